//! Per-session workspace snapshot

use crate::capability::CapabilityIndex;
use futures::future::{BoxFuture, FutureExt, Shared};
use lodestar_catalog::RemoteCatalog;
use lodestar_core::types::FeaturedEntry;
use lodestar_workspace::{InstalledExtensions, WorkspaceConfigStore};
use serde::Serialize;
use std::sync::Arc;
use tracing::{info, warn};

/// Immutable result of the three startup tasks
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct WorkspaceAnalysis {
    pub featured: Vec<FeaturedEntry>,
    pub capabilities: CapabilityIndex,
    pub devfile_has_extensions: bool,
}

/// Write-once snapshot awaited independently by every downstream flow
pub type SharedAnalysis = Shared<BoxFuture<'static, Arc<WorkspaceAnalysis>>>;

impl WorkspaceAnalysis {
    /// Fetch the featured list, index installed extensions and inspect the
    /// devfile concurrently. None of the three tasks can fail the analysis.
    pub async fn gather(
        catalog: Arc<dyn RemoteCatalog>,
        installed: Arc<dyn InstalledExtensions>,
        config_store: Arc<dyn WorkspaceConfigStore>,
    ) -> Self {
        let featured = catalog.fetch_featured();

        let capabilities = async move {
            match tokio::task::spawn_blocking(move || CapabilityIndex::build(&installed.manifests()))
                .await
            {
                Ok(index) => index,
                Err(e) => {
                    warn!("Indexing installed extensions failed: {}", e);
                    CapabilityIndex::default()
                }
            }
        };

        let devfile_has_extensions = async move {
            match config_store.has_extensions().await {
                Ok(has_extensions) => has_extensions,
                Err(e) => {
                    warn!("Unable to inspect workspace configuration: {}", e);
                    false
                }
            }
        };

        let (featured, capabilities, devfile_has_extensions) =
            tokio::join!(featured, capabilities, devfile_has_extensions);

        info!(
            "Workspace analysis ready: {} featured entries, {} covered languages, devfile extensions: {}",
            featured.len(),
            capabilities.extensions_by_language().len(),
            devfile_has_extensions
        );

        Self {
            featured,
            capabilities,
            devfile_has_extensions,
        }
    }

    /// Start gathering and return the shared handle to its result
    pub fn shared(
        catalog: Arc<dyn RemoteCatalog>,
        installed: Arc<dyn InstalledExtensions>,
        config_store: Arc<dyn WorkspaceConfigStore>,
    ) -> SharedAnalysis {
        async move { Arc::new(Self::gather(catalog, installed, config_store).await) }
            .boxed()
            .shared()
    }
}
