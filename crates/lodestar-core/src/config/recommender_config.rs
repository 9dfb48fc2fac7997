//! Recommender configuration types
//!
//! Every field has a serde default so partial files deserialize cleanly.
//! The defaults match `embedded/config/defaults.yaml`.

use crate::error::Result;
use crate::utils::expand_home;
use camino::Utf8PathBuf;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Complete recommender configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct RecommenderConfig {
    /// Remote catalog endpoints
    #[serde(default)]
    pub catalog: CatalogConfig,

    /// Workspace scan settings
    #[serde(default)]
    pub scan: ScanConfig,

    /// Local workspace locations
    #[serde(default)]
    pub workspace: WorkspaceConfig,
}

/// Remote catalog endpoints and HTTP settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct CatalogConfig {
    /// URL of the featured recommendations document
    #[serde(default = "default_featured_url")]
    pub featured_url: String,

    /// Base URL of the per-language catalog (`<base>/<languageID>.json`)
    #[serde(default = "default_language_base_url")]
    pub language_base_url: String,

    /// HTTP timeout in seconds
    #[serde(default = "default_http_timeout")]
    pub http_timeout_secs: u64,

    /// User agent string for HTTP requests
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            featured_url: default_featured_url(),
            language_base_url: default_language_base_url(),
            http_timeout_secs: default_http_timeout(),
            user_agent: default_user_agent(),
        }
    }
}

impl CatalogConfig {
    pub fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.http_timeout_secs)
    }
}

/// Workspace scan settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ScanConfig {
    /// Soft deadline for one scan of all workspace roots
    #[serde(default = "default_scan_timeout")]
    pub timeout_ms: u64,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            timeout_ms: default_scan_timeout(),
        }
    }
}

impl ScanConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

/// Local workspace locations
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct WorkspaceConfig {
    /// Devfile holding the declared components
    #[serde(default = "default_devfile")]
    pub devfile: Utf8PathBuf,

    /// Directory of installed extensions, one sub-directory per extension
    #[serde(default = "default_extensions_dir")]
    pub extensions_dir: String,
}

impl Default for WorkspaceConfig {
    fn default() -> Self {
        Self {
            devfile: default_devfile(),
            extensions_dir: default_extensions_dir(),
        }
    }
}

impl WorkspaceConfig {
    /// Installed extensions directory with `~` expanded
    pub fn resolved_extensions_dir(&self) -> Result<PathBuf> {
        expand_home(&self.extensions_dir)
    }
}

fn default_featured_url() -> String {
    "https://gist.githubusercontent.com/benoitf/aa55b92ec12fb7436d6bacbad60e95d5/raw/featured.json"
        .to_string()
}
fn default_language_base_url() -> String {
    "https://raw.githubusercontent.com/benoitf/my-che-repository/master/v3/recommendations/language"
        .to_string()
}
fn default_http_timeout() -> u64 {
    30
}
fn default_user_agent() -> String {
    format!(
        "lodestar/{} ({}; {})",
        env!("CARGO_PKG_VERSION"),
        std::env::consts::OS,
        std::env::consts::ARCH
    )
}
fn default_scan_timeout() -> u64 {
    3000
}
fn default_devfile() -> Utf8PathBuf {
    Utf8PathBuf::from("devfile.yaml")
}
fn default_extensions_dir() -> String {
    "~/.vscode/extensions".to_string()
}
