//! Devfile types
//!
//! Only the component list is interpreted. Every other field, at the top
//! level and inside components, is carried through untouched so rewriting a
//! devfile never drops user configuration.

use serde::{Deserialize, Serialize};
use serde_yaml_ng::Value;
use std::collections::BTreeMap;

/// Component type that declares an editor extension
pub const CHE_PLUGIN_TYPE: &str = "chePlugin";

/// Version suffix appended to extension IDs written into the devfile
pub const LATEST_SUFFIX: &str = "/latest";

/// Persisted workspace configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Devfile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub components: Option<Vec<DevfileComponent>>,

    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

/// One declared component
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DevfileComponent {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(rename = "type")]
    pub component_type: String,

    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl DevfileComponent {
    /// Component declaring `extension_id` at its latest version
    pub fn che_plugin(extension_id: &str) -> Self {
        Self {
            id: Some(format!("{}{}", extension_id, LATEST_SUFFIX)),
            component_type: CHE_PLUGIN_TYPE.to_string(),
            extra: BTreeMap::new(),
        }
    }

    pub fn is_extension(&self) -> bool {
        self.component_type == CHE_PLUGIN_TYPE
    }

    /// Extension ID with any trailing `/latest` removed
    pub fn extension_id(&self) -> Option<&str> {
        if !self.is_extension() {
            return None;
        }
        self.id
            .as_deref()
            .filter(|id| !id.is_empty())
            .map(|id| id.strip_suffix(LATEST_SUFFIX).unwrap_or(id))
    }
}

impl Devfile {
    /// Parse a YAML devfile
    pub fn from_yaml(content: &str) -> crate::Result<Self> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml_ng::from_str(content)?)
    }

    /// Serialize back to YAML
    pub fn to_yaml(&self) -> crate::Result<String> {
        Ok(serde_yaml_ng::to_string(self)?)
    }

    pub fn components(&self) -> &[DevfileComponent] {
        self.components.as_deref().unwrap_or_default()
    }

    /// True iff at least one component is an extension
    pub fn has_extensions(&self) -> bool {
        self.components().iter().any(DevfileComponent::is_extension)
    }

    /// Declared extension IDs, `/latest` suffix stripped
    pub fn extension_ids(&self) -> Vec<String> {
        self.components()
            .iter()
            .filter_map(DevfileComponent::extension_id)
            .map(str::to_string)
            .collect()
    }

    /// Append an extension component for each ID not already declared
    ///
    /// Returns the IDs that were actually appended, in input order.
    pub fn add_extensions(&mut self, extension_ids: &[String]) -> Vec<String> {
        let mut declared = self.extension_ids();
        let mut added = Vec::new();

        for id in extension_ids {
            if declared.contains(id) {
                continue;
            }
            self.components
                .get_or_insert_with(Vec::new)
                .push(DevfileComponent::che_plugin(id));
            declared.push(id.clone());
            added.push(id.clone());
        }

        added
    }
}
