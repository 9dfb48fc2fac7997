//! Discovery of installed extension manifests

use lodestar_core::types::ExtensionManifest;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

const PACKAGE_JSON: &str = "package.json";

/// Live view of the extensions installed in the host
pub trait InstalledExtensions: Send + Sync {
    /// Snapshot of every installed manifest
    fn manifests(&self) -> Vec<ExtensionManifest>;
}

/// Fixed manifest list, for hosts that already hold the manifests in memory
#[derive(Debug, Clone, Default)]
pub struct StaticExtensions(pub Vec<ExtensionManifest>);

impl InstalledExtensions for StaticExtensions {
    fn manifests(&self) -> Vec<ExtensionManifest> {
        self.0.clone()
    }
}

/// Extensions unpacked under one directory, each with its own `package.json`
///
/// Layout: `<dir>/<extension-folder>/package.json`.
#[derive(Debug, Clone)]
pub struct ManifestDirectory {
    dir: PathBuf,
}

impl ManifestDirectory {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn read_manifest(path: &Path) -> Option<ExtensionManifest> {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) => {
                warn!("Cannot read {}: {}", path.display(), e);
                return None;
            }
        };

        match ExtensionManifest::from_package_json(&content, &path.display().to_string()) {
            Ok(manifest) => Some(manifest),
            Err(e) => {
                warn!("Skipping extension: {}", e);
                None
            }
        }
    }
}

impl InstalledExtensions for ManifestDirectory {
    fn manifests(&self) -> Vec<ExtensionManifest> {
        let entries = match fs::read_dir(&self.dir) {
            Ok(entries) => entries,
            Err(e) => {
                debug!(
                    "No installed extensions under {}: {}",
                    self.dir.display(),
                    e
                );
                return Vec::new();
            }
        };

        let mut package_files: Vec<PathBuf> = entries
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path().join(PACKAGE_JSON))
            .filter(|path| path.is_file())
            .collect();
        package_files.sort();

        let manifests: Vec<ExtensionManifest> = package_files
            .iter()
            .filter_map(|path| Self::read_manifest(path))
            .collect();

        debug!(
            "Loaded {} installed extension manifests from {}",
            manifests.len(),
            self.dir.display()
        );
        manifests
    }
}
