//! Hierarchical configuration loader with precedence
//!
//! Loads configuration from multiple sources with the following precedence (low to high):
//! 1. Embedded defaults (built into binary)
//! 2. User config (~/.lodestar/config.yaml)
//! 3. Environment variables (LODESTAR_* prefix)
//! 4. CLI flags (handled by caller)

use super::RecommenderConfig;
use crate::error::{Error, Result};
use crate::utils::get_home_dir;
use camino::{Utf8Path, Utf8PathBuf};
use rust_embed::RustEmbed;
use serde_yaml_ng::Value;
use std::env;
use std::fs;
use tracing::debug;

/// Embedded configuration files
#[derive(RustEmbed)]
#[folder = "$CARGO_MANIFEST_DIR/../../embedded/config/"]
#[prefix = ""]
struct EmbeddedConfigs;

const DEFAULTS_FILE: &str = "defaults.yaml";
const USER_CONFIG_FILE: &str = "config.yaml";

/// Configuration hierarchy loader
pub struct ConfigLoader {
    /// Directory holding the user configuration file
    config_dir: Utf8PathBuf,
}

impl ConfigLoader {
    /// Create a loader rooted at the standard config directory (~/.lodestar)
    pub fn new() -> Result<Self> {
        let home = get_home_dir()?;
        let home = Utf8PathBuf::from_path_buf(home)
            .map_err(|p| Error::invalid_config(format!("Non UTF-8 home directory: {:?}", p)))?;
        Ok(Self {
            config_dir: home.join(".lodestar"),
        })
    }

    /// Create a loader with a custom config directory
    pub fn with_dir(config_dir: Utf8PathBuf) -> Self {
        Self { config_dir }
    }

    pub fn config_dir(&self) -> &Utf8Path {
        &self.config_dir
    }

    /// Load the recommender configuration with hierarchical precedence
    pub fn load(&self) -> Result<RecommenderConfig> {
        let mut merged = Self::load_embedded_defaults()?;

        let user_config_path = self.config_dir.join(USER_CONFIG_FILE);
        if user_config_path.exists() {
            debug!("Loading user configuration from {}", user_config_path);
            let overlay = Self::load_yaml_value(&user_config_path)?;
            merge_values(&mut merged, overlay);
        }

        let config: RecommenderConfig = serde_yaml_ng::from_value(merged)
            .map_err(|e| Error::invalid_config(format!("Failed to apply configuration: {}", e)))?;

        Self::apply_env_overrides(config)
    }

    fn load_embedded_defaults() -> Result<Value> {
        let embedded_file = EmbeddedConfigs::get(DEFAULTS_FILE).ok_or_else(|| {
            Error::config_not_found(format!("Embedded config not found: {}", DEFAULTS_FILE))
        })?;

        let content = std::str::from_utf8(&embedded_file.data).map_err(|_| {
            Error::invalid_config(format!("Invalid UTF-8 in embedded config: {}", DEFAULTS_FILE))
        })?;

        serde_yaml_ng::from_str(content).map_err(|e| {
            Error::invalid_config(format!(
                "Failed to parse embedded config {}: {}",
                DEFAULTS_FILE, e
            ))
        })
    }

    fn load_yaml_value(path: &Utf8Path) -> Result<Value> {
        let content = fs::read_to_string(path)?;
        if content.trim().is_empty() {
            return Ok(Value::Null);
        }
        serde_yaml_ng::from_str(&content)
            .map_err(|e| Error::invalid_config(format!("Failed to parse {}: {}", path, e)))
    }

    /// Apply environment variable overrides
    fn apply_env_overrides(mut config: RecommenderConfig) -> Result<RecommenderConfig> {
        if let Ok(val) = env::var("LODESTAR_FEATURED_URL") {
            config.catalog.featured_url = val;
        }

        if let Ok(val) = env::var("LODESTAR_LANGUAGE_BASE_URL") {
            config.catalog.language_base_url = val;
        }

        if let Ok(val) = env::var("LODESTAR_HTTP_TIMEOUT_SECS") {
            config.catalog.http_timeout_secs = val.parse().map_err(|_| {
                Error::invalid_config("LODESTAR_HTTP_TIMEOUT_SECS must be a valid number")
            })?;
        }

        if let Ok(val) = env::var("LODESTAR_USER_AGENT") {
            config.catalog.user_agent = val;
        }

        if let Ok(val) = env::var("LODESTAR_SCAN_TIMEOUT_MS") {
            config.scan.timeout_ms = val.parse().map_err(|_| {
                Error::invalid_config("LODESTAR_SCAN_TIMEOUT_MS must be a valid number")
            })?;
        }

        if let Ok(val) = env::var("LODESTAR_DEVFILE") {
            config.workspace.devfile = Utf8PathBuf::from(val);
        }

        if let Ok(val) = env::var("LODESTAR_EXTENSIONS_DIR") {
            config.workspace.extensions_dir = val;
        }

        Ok(config)
    }
}

/// Deep-merge `overlay` into `base`; mappings merge key by key, anything else replaces
fn merge_values(base: &mut Value, overlay: Value) {
    match (base, overlay) {
        (_, Value::Null) => {}
        (Value::Mapping(base_map), Value::Mapping(overlay_map)) => {
            for (key, value) in overlay_map {
                match base_map.get_mut(&key) {
                    Some(existing) => merge_values(existing, value),
                    None => {
                        base_map.insert(key, value);
                    }
                }
            }
        }
        (base, overlay) => *base = overlay,
    }
}
