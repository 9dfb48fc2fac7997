//! Extension capability index
//!
//! Two lookup tables derived from the installed manifests:
//! - file extension → language IDs declaring it
//! - language ID → installed extensions activated by `onLanguage:<id>`
//!
//! Inserts are idempotent, so an extension installed twice (or two
//! manifests sharing an ID) never yields duplicate entries.

use lodestar_core::types::ExtensionManifest;
use lodestar_workspace::scanner::file_extension;
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::Path;
use tracing::debug;

/// Language capabilities of the installed extensions
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CapabilityIndex {
    languages_by_file_extension: BTreeMap<String, Vec<String>>,
    extensions_by_language: BTreeMap<String, Vec<String>>,
}

fn insert_unique(map: &mut BTreeMap<String, Vec<String>>, key: &str, value: &str) {
    let values = map.entry(key.to_string()).or_default();
    if !values.iter().any(|existing| existing == value) {
        values.push(value.to_string());
    }
}

impl CapabilityIndex {
    /// Build the index from a snapshot of installed manifests
    pub fn build(manifests: &[ExtensionManifest]) -> Self {
        let mut index = Self::default();

        for manifest in manifests {
            for language in manifest.languages() {
                let Some(language_id) = language.id.as_deref().filter(|id| !id.is_empty()) else {
                    continue;
                };
                for file_extension in &language.extensions {
                    index.register_language(file_extension, language_id);
                }
            }

            for language_id in manifest.activation_languages() {
                index.register_extension(language_id, &manifest.id);
            }
        }

        debug!(
            "Indexed {} manifests: {} file extensions, {} covered languages",
            manifests.len(),
            index.languages_by_file_extension.len(),
            index.extensions_by_language.len()
        );
        index
    }

    /// Record that `file_extension` belongs to `language_id`
    pub fn register_language(&mut self, file_extension: &str, language_id: &str) {
        insert_unique(
            &mut self.languages_by_file_extension,
            file_extension,
            language_id,
        );
    }

    /// Record that `extension_id` is installed for `language_id`
    pub fn register_extension(&mut self, language_id: &str, extension_id: &str) {
        insert_unique(&mut self.extensions_by_language, language_id, extension_id);
    }

    pub fn languages_for_file_extension(&self, file_extension: &str) -> &[String] {
        self.languages_by_file_extension
            .get(file_extension)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub fn extensions_for_language(&self, language_id: &str) -> &[String] {
        self.extensions_by_language
            .get(language_id)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Whether some installed extension already covers `language_id`
    pub fn has_extension_for_language(&self, language_id: &str) -> bool {
        !self.extensions_for_language(language_id).is_empty()
    }

    /// First language declared for the file's extension, if any
    pub fn language_for_path(&self, path: &Path) -> Option<&str> {
        let extension = file_extension(path.file_name()?.to_str()?)?;
        self.languages_for_file_extension(extension)
            .first()
            .map(String::as_str)
    }

    pub fn languages_by_file_extension(&self) -> &BTreeMap<String, Vec<String>> {
        &self.languages_by_file_extension
    }

    pub fn extensions_by_language(&self) -> &BTreeMap<String, Vec<String>> {
        &self.extensions_by_language
    }
}
