//! Workspace file extension scanner
//!
//! Every root is walked on its own blocking task, honouring ignore files.
//! The overall call is bounded by a soft deadline: when it expires the
//! walkers are told to stop and whatever was found so far is returned.

use async_trait::async_trait;
use futures::future::join_all;
use ignore::WalkBuilder;
use std::collections::{BTreeSet, HashSet};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tracing::{debug, info, warn};

/// Distinct file-name suffixes (e.g. `.java`) found under the workspace roots
pub type ScannedExtensions = BTreeSet<String>;

/// Deadline used when the caller has no configured value
pub const DEFAULT_SCAN_TIMEOUT: Duration = Duration::from_millis(3000);

/// Source of the file extensions present in a workspace
#[async_trait]
pub trait ExtensionScanner: Send + Sync {
    /// Scan all roots, returning within `timeout` with partial results if needed
    async fn find(&self, roots: &[PathBuf], timeout: Duration) -> ScannedExtensions;
}

/// Suffix of `file_name` starting at its last dot
///
/// `Main.java` → `.java`, `.gitignore` → `.gitignore`, `Makefile` → none.
pub fn file_extension(file_name: &str) -> Option<&str> {
    let index = file_name.rfind('.')?;
    let extension = &file_name[index..];
    (extension.len() > 1).then_some(extension)
}

/// Filesystem scanner backed by the `ignore` crate
#[derive(Debug, Default, Clone, Copy)]
pub struct FsExtensionScanner;

impl FsExtensionScanner {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl ExtensionScanner for FsExtensionScanner {
    async fn find(&self, roots: &[PathBuf], timeout: Duration) -> ScannedExtensions {
        let found = Arc::new(Mutex::new(ScannedExtensions::new()));
        let cancelled = Arc::new(AtomicBool::new(false));

        let walks = roots.iter().map(|root| {
            info!("Finding extensions in folder {}", root.display());
            let root = root.clone();
            let found = Arc::clone(&found);
            let cancelled = Arc::clone(&cancelled);
            tokio::task::spawn_blocking(move || walk_root(&root, &found, &cancelled))
        });

        match tokio::time::timeout(timeout, join_all(walks)).await {
            Ok(results) => {
                for result in results {
                    if let Err(e) = result {
                        warn!("Workspace walker did not finish: {}", e);
                    }
                }
            }
            Err(_) => {
                cancelled.store(true, Ordering::Relaxed);
                info!(
                    "Workspace scan reached its {}ms deadline, using partial results",
                    timeout.as_millis()
                );
            }
        }

        let extensions = found
            .lock()
            .map(|set| set.clone())
            .unwrap_or_else(|poisoned| poisoned.into_inner().clone());
        debug!("Found {} distinct file extensions", extensions.len());
        extensions
    }
}

/// Walk one root, publishing each newly seen extension as soon as it is found
fn walk_root(root: &Path, found: &Mutex<ScannedExtensions>, cancelled: &AtomicBool) {
    if !root.exists() {
        warn!("Workspace root does not exist: {}", root.display());
        return;
    }

    let walker = WalkBuilder::new(root)
        .hidden(true)
        .git_ignore(true)
        .require_git(false)
        .build();

    let mut seen = HashSet::new();
    for entry in walker {
        if cancelled.load(Ordering::Relaxed) {
            debug!("Stopping walk of {}", root.display());
            return;
        }

        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                debug!("Skipping unreadable entry: {}", e);
                continue;
            }
        };
        if !entry.file_type().is_some_and(|ft| ft.is_file()) {
            continue;
        }

        let Some(extension) = entry.file_name().to_str().and_then(file_extension) else {
            continue;
        };
        if seen.insert(extension.to_string()) {
            let mut shared = found
                .lock()
                .unwrap_or_else(|poisoned| poisoned.into_inner());
            shared.insert(extension.to_string());
        }
    }
}
