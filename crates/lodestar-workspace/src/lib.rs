//! Workspace-side collaborators for Lodestar
//!
//! This crate handles:
//! - Scanning workspace roots for the file extensions they contain
//! - Reading and appending extension components in the devfile
//! - Discovering the manifests of installed extensions
//! - Requesting a workspace restart once the devfile changed

pub mod devfile;
pub mod installed;
pub mod restart;
pub mod scanner;

pub use devfile::{DevfileStore, WorkspaceConfigStore};
pub use installed::{InstalledExtensions, ManifestDirectory, StaticExtensions};
pub use restart::{NotifyingRestarter, WorkspaceRestarter};
pub use scanner::{
    ExtensionScanner, FsExtensionScanner, ScannedExtensions, DEFAULT_SCAN_TIMEOUT,
};
