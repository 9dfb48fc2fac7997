//! Remote catalog types

use crate::types::LanguageContribution;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Category label of per-language catalog entries eligible for recommendation
pub const PROGRAMMING_LANGUAGES_CATEGORY: &str = "Programming Languages";

/// Envelope of the featured catalog document
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FeaturedList {
    #[serde(default)]
    pub featured: Vec<FeaturedEntry>,
}

/// A curated recommendation from the featured catalog
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeaturedEntry {
    /// Extension identifier to recommend
    pub id: String,

    /// Language IDs this entry targets; the only field that gates matching
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub on_language: Option<Vec<String>>,

    /// Workspace marker paths
    #[serde(default)]
    pub workspace_contains: Vec<String>,

    #[serde(default)]
    pub contributes: FeaturedContributes,
}

/// Languages contributed by a featured extension
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeaturedContributes {
    #[serde(default)]
    pub languages: Vec<LanguageContribution>,
}

impl FeaturedEntry {
    /// Create an entry targeting the given languages
    pub fn new(id: impl Into<String>, on_language: &[&str]) -> Self {
        Self {
            id: id.into(),
            on_language: Some(on_language.iter().map(|l| l.to_string()).collect()),
            ..Default::default()
        }
    }

    /// Whether `onLanguage` names any of the candidate languages
    pub fn targets_any(&self, languages: &HashSet<&str>) -> bool {
        self.on_language
            .iter()
            .flatten()
            .any(|language| languages.contains(language.as_str()))
    }
}

/// One category of the per-language fallback catalog
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LanguageCatalogEntry {
    pub category: String,

    #[serde(default)]
    pub ids: Vec<String>,
}

impl LanguageCatalogEntry {
    pub fn new(category: impl Into<String>, ids: &[&str]) -> Self {
        Self {
            category: category.into(),
            ids: ids.iter().map(|id| id.to_string()).collect(),
        }
    }

    /// Only programming-language entries are recommended
    pub fn is_programming_language(&self) -> bool {
        self.category == PROGRAMMING_LANGUAGES_CATEGORY
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_featured_document_parses() {
        let json = r#"{
            "featured": [
                {
                    "id": "redhat/java",
                    "onLanguage": ["java"],
                    "workspaceContains": ["pom.xml"],
                    "contributes": { "languages": [ { "id": "java", "extensions": [".java"] } ] }
                },
                { "id": "ms-python/python" }
            ]
        }"#;
        let list: FeaturedList = serde_json::from_str(json).unwrap();
        assert_eq!(list.featured.len(), 2);
        assert_eq!(list.featured[0].workspace_contains, vec!["pom.xml"]);
        assert!(list.featured[1].on_language.is_none());
    }

    #[test]
    fn test_missing_featured_field_is_empty() {
        let list: FeaturedList = serde_json::from_str("{}").unwrap();
        assert!(list.featured.is_empty());
    }

    #[test]
    fn test_targets_any_requires_on_language() {
        let mut entry = FeaturedEntry::new("redhat/java", &["java"]);
        let languages: HashSet<&str> = ["java"].into_iter().collect();
        assert!(entry.targets_any(&languages));

        entry.on_language = None;
        assert!(!entry.targets_any(&languages));
    }

    #[test]
    fn test_programming_language_category() {
        assert!(LanguageCatalogEntry::new("Programming Languages", &["a"]).is_programming_language());
        assert!(!LanguageCatalogEntry::new("Linters", &["a"]).is_programming_language());
    }
}
