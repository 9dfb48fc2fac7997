//! Devfile-backed workspace configuration store

use async_trait::async_trait;
use lodestar_core::types::Devfile;
use lodestar_core::{Error, Result};
use std::io::Write;
use std::path::{Path, PathBuf};
use tokio::sync::Mutex;
use tracing::{debug, info};

/// Persisted workspace configuration that declares extensions
#[async_trait]
pub trait WorkspaceConfigStore: Send + Sync {
    /// Whether any extension component is declared
    async fn has_extensions(&self) -> Result<bool>;

    /// Declared extension IDs, without the `/latest` suffix
    async fn extension_ids(&self) -> Result<Vec<String>>;

    /// Append extension components and persist; returns the IDs actually added
    async fn add_extensions(&self, extension_ids: &[String]) -> Result<Vec<String>>;
}

/// Store reading and rewriting a YAML devfile on disk
///
/// A missing devfile reads as an empty one and is created on first write.
pub struct DevfileStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl DevfileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read and parse the devfile
    pub async fn load(&self) -> Result<Devfile> {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => Devfile::from_yaml(&content),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!("No devfile at {}, treating as empty", self.path.display());
                Ok(Devfile::default())
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Replace the devfile atomically (temp file in the same directory, then rename)
    async fn save(&self, devfile: &Devfile) -> Result<()> {
        let content = devfile.to_yaml()?;
        let path = self.path.clone();

        tokio::task::spawn_blocking(move || write_atomically(&path, &content))
            .await
            .map_err(|e| Error::devfile_update(self.path.display().to_string(), e.to_string()))?
    }
}

fn write_atomically(path: &Path, content: &str) -> Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut file = tempfile::NamedTempFile::new_in(dir)?;
    file.write_all(content.as_bytes())?;
    file.persist(path)
        .map_err(|e| Error::devfile_update(path.display().to_string(), e.to_string()))?;
    Ok(())
}

#[async_trait]
impl WorkspaceConfigStore for DevfileStore {
    async fn has_extensions(&self) -> Result<bool> {
        Ok(self.load().await?.has_extensions())
    }

    async fn extension_ids(&self) -> Result<Vec<String>> {
        Ok(self.load().await?.extension_ids())
    }

    async fn add_extensions(&self, extension_ids: &[String]) -> Result<Vec<String>> {
        let _guard = self.write_lock.lock().await;

        let mut devfile = self.load().await?;
        let added = devfile.add_extensions(extension_ids);
        if added.is_empty() {
            debug!("All recommended extensions are already declared");
            return Ok(added);
        }

        self.save(&devfile).await?;
        info!(
            "Added {} extension(s) to {}: {}",
            added.len(),
            self.path.display(),
            added.join(", ")
        );
        Ok(added)
    }
}
