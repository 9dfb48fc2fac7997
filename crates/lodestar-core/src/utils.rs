//! Shared utility functions for Lodestar crates

use crate::error::{Error, Result};
use std::path::PathBuf;

/// Get the user's home directory
///
/// Prefers the HOME environment variable over dirs::home_dir() so that
/// containerised workspaces which remap HOME resolve the same directory
/// their shell scripts do.
pub fn get_home_dir() -> Result<PathBuf> {
    if let Ok(home) = std::env::var("HOME") {
        return Ok(PathBuf::from(home));
    }

    dirs::home_dir().ok_or(Error::HomeDirNotFound)
}

/// Expand a leading `~` or `~/` to the user's home directory
pub fn expand_home(path: &str) -> Result<PathBuf> {
    if path == "~" {
        return get_home_dir();
    }
    match path.strip_prefix("~/") {
        Some(rest) => Ok(get_home_dir()?.join(rest)),
        None => Ok(PathBuf::from(path)),
    }
}
