//! Open-file advisor
//!
//! When a document opens in a language that no installed extension covers,
//! the per-language catalog is consulted and the user is told which
//! extensions could help. The advisor never installs anything.

use crate::analysis::WorkspaceAnalysis;
use lodestar_catalog::RemoteCatalog;
use lodestar_core::notify::Notifier;
use lodestar_core::types::LanguageCatalogEntry;
use serde::Serialize;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::debug;

/// A document the host has just opened
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpenedDocument {
    pub path: PathBuf,
    pub language_id: String,
}

impl OpenedDocument {
    pub fn new(path: impl Into<PathBuf>, language_id: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            language_id: language_id.into(),
        }
    }
}

/// What the advisor did for one document
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "advice", rename_all = "kebab-case")]
pub enum Advice {
    /// The session has not been started yet
    NotStarted,
    /// The session has been stopped
    Stopped,
    /// The document lives outside every workspace root
    OutsideWorkspace,
    /// The host gave no language for the document
    UnknownLanguage,
    /// Installed extensions already cover the language
    AlreadyCovered { extensions: Vec<String> },
    /// The catalog has nothing for the language
    NoCandidates { language_id: String },
    /// The user was notified about these extensions
    Notified {
        language_id: String,
        extensions: Vec<String>,
    },
}

/// Whether `path` is one of `roots` or lies beneath one
pub fn is_within_roots(path: &Path, roots: &[PathBuf]) -> bool {
    roots.iter().any(|root| path.starts_with(root))
}

/// Deduplicated extension IDs from the "Programming Languages" entries
pub fn programming_language_candidates(entries: &[LanguageCatalogEntry]) -> Vec<String> {
    let mut seen = HashSet::new();
    entries
        .iter()
        .filter(|entry| entry.is_programming_language())
        .flat_map(|entry| entry.ids.iter())
        .filter(|id| seen.insert(id.as_str()))
        .cloned()
        .collect()
}

pub struct OpenFileAdvisor {
    catalog: Arc<dyn RemoteCatalog>,
    notifier: Arc<dyn Notifier>,
}

impl OpenFileAdvisor {
    pub fn new(catalog: Arc<dyn RemoteCatalog>, notifier: Arc<dyn Notifier>) -> Self {
        Self { catalog, notifier }
    }

    pub async fn on_open_file(
        &self,
        document: &OpenedDocument,
        analysis: &WorkspaceAnalysis,
        roots: &[PathBuf],
    ) -> Advice {
        if !is_within_roots(&document.path, roots) {
            debug!("{} is outside the workspace", document.path.display());
            return Advice::OutsideWorkspace;
        }

        let language_id = document.language_id.as_str();
        if language_id.is_empty() {
            return Advice::UnknownLanguage;
        }

        let installed = analysis.capabilities.extensions_for_language(language_id);
        if !installed.is_empty() {
            debug!("'{}' is covered by {:?}", language_id, installed);
            return Advice::AlreadyCovered {
                extensions: installed.to_vec(),
            };
        }

        let entries = self.catalog.fetch_for_language(language_id).await;
        let extensions = programming_language_candidates(&entries);
        if extensions.is_empty() {
            debug!("No catalog extensions for '{}'", language_id);
            return Advice::NoCandidates {
                language_id: language_id.to_string(),
            };
        }

        self.notifier.info(&format!(
            "The extension registry has extensions that can help with '{}' files: {}",
            language_id,
            extensions.join(", ")
        ));

        Advice::Notified {
            language_id: language_id.to_string(),
            extensions,
        }
    }
}
