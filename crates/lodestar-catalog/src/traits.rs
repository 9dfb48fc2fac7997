//! Catalog trait definitions

use async_trait::async_trait;
use lodestar_core::types::{FeaturedEntry, LanguageCatalogEntry};

/// Remote source of extension recommendations
///
/// Implementations never fail: errors become empty lists, and any
/// user-relevant failure is reported through the implementation's notifier.
#[async_trait]
pub trait RemoteCatalog: Send + Sync {
    /// Fetch the featured recommendations
    async fn fetch_featured(&self) -> Vec<FeaturedEntry>;

    /// Fetch the fallback recommendations for one language ID
    async fn fetch_for_language(&self, language_id: &str) -> Vec<LanguageCatalogEntry>;
}
