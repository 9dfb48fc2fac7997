//! Installed extension manifest types
//!
//! Mirrors the subset of a VS Code style `package.json` that describes
//! which languages an extension contributes and which events activate it.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// Activation event prefix that binds an extension to a language ID
pub const ON_LANGUAGE_PREFIX: &str = "onLanguage:";

/// One installed extension's declared capabilities
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtensionManifest {
    /// Extension identifier, unique per install
    pub id: String,

    /// Contribution points (only `languages` is consumed)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contributes: Option<Contributes>,

    /// Activation triggers such as `onLanguage:java`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub activation_events: Option<Vec<String>>,
}

/// Contribution points declared by an extension
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contributes {
    /// Language definitions
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub languages: Option<Vec<LanguageContribution>>,
}

/// A language definition: identifier plus the file names/extensions it claims
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LanguageContribution {
    /// Language identifier (e.g. `java`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(default)]
    pub aliases: Vec<String>,

    /// File extensions including the leading dot (e.g. `.java`)
    #[serde(default)]
    pub extensions: Vec<String>,

    #[serde(default)]
    pub filenames: Vec<String>,
}

/// Raw `package.json` layout, where the identifier is `publisher.name`
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PackageJson {
    #[serde(default)]
    id: Option<String>,
    #[serde(default)]
    publisher: Option<String>,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    contributes: Option<Contributes>,
    #[serde(default)]
    activation_events: Option<Vec<String>>,
}

impl ExtensionManifest {
    /// Create a manifest with no contributions
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            contributes: None,
            activation_events: None,
        }
    }

    /// Add a language contribution
    pub fn with_language(mut self, language_id: &str, extensions: &[&str]) -> Self {
        let language = LanguageContribution {
            id: Some(language_id.to_string()),
            extensions: extensions.iter().map(|e| e.to_string()).collect(),
            ..Default::default()
        };
        self.contributes
            .get_or_insert_with(Contributes::default)
            .languages
            .get_or_insert_with(Vec::new)
            .push(language);
        self
    }

    /// Add an activation event
    pub fn with_activation_event(mut self, event: &str) -> Self {
        self.activation_events
            .get_or_insert_with(Vec::new)
            .push(event.to_string());
        self
    }

    /// Parse a `package.json` document
    ///
    /// `origin` only labels errors (usually the file path).
    pub fn from_package_json(content: &str, origin: &str) -> Result<Self> {
        let raw: PackageJson = serde_json::from_str(content)
            .map_err(|e| Error::invalid_manifest(origin, e.to_string()))?;

        let id = match (raw.id, raw.publisher, raw.name) {
            (Some(id), _, _) if !id.is_empty() => id,
            (_, Some(publisher), Some(name)) => format!("{}.{}", publisher, name),
            (_, None, Some(name)) => name,
            _ => {
                return Err(Error::invalid_manifest(
                    origin,
                    "missing extension identifier (id or publisher/name)",
                ))
            }
        };

        Ok(Self {
            id,
            contributes: raw.contributes,
            activation_events: raw.activation_events,
        })
    }

    /// Declared language contributions, empty when the section is missing
    pub fn languages(&self) -> &[LanguageContribution] {
        self.contributes
            .as_ref()
            .and_then(|c| c.languages.as_deref())
            .unwrap_or_default()
    }

    /// Language IDs named by `onLanguage:` activation events
    pub fn activation_languages(&self) -> impl Iterator<Item = &str> {
        self.activation_events
            .iter()
            .flatten()
            .filter_map(|event| event.strip_prefix(ON_LANGUAGE_PREFIX))
            .filter(|language| !language.is_empty())
    }
}
