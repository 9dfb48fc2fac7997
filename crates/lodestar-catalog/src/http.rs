//! HTTP implementation of the remote catalog

use crate::error::FetchError;
use crate::traits::RemoteCatalog;
use async_trait::async_trait;
use lodestar_core::config::CatalogConfig;
use lodestar_core::types::{FeaturedEntry, FeaturedList, LanguageCatalogEntry};
use lodestar_core::Notifier;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use std::sync::Arc;
use tracing::{debug, info, warn};
use url::Url;

/// Catalog client backed by plain HTTP GETs
pub struct HttpCatalog {
    client: reqwest::Client,
    featured_url: String,
    language_base_url: Url,
    notifier: Arc<dyn Notifier>,
}

impl HttpCatalog {
    /// Create a client from catalog configuration
    pub fn new(config: &CatalogConfig, notifier: Arc<dyn Notifier>) -> Result<Self, FetchError> {
        let language_base_url =
            Url::parse(&config.language_base_url).map_err(|e| FetchError::InvalidUrl {
                url: config.language_base_url.clone(),
                message: e.to_string(),
            })?;
        if language_base_url.cannot_be_a_base() {
            return Err(FetchError::InvalidUrl {
                url: config.language_base_url.clone(),
                message: "URL cannot be used as a base".to_string(),
            });
        }

        let client = reqwest::Client::builder()
            .user_agent(&config.user_agent)
            .timeout(config.http_timeout())
            .build()?;

        Ok(Self {
            client,
            featured_url: config.featured_url.clone(),
            language_base_url,
            notifier,
        })
    }

    /// URL of the per-language document: `<base>/<languageID>.json`
    pub fn language_url(&self, language_id: &str) -> String {
        let mut url = self.language_base_url.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments
                .pop_if_empty()
                .push(&format!("{}.json", language_id));
        }
        url.to_string()
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, FetchError> {
        debug!("Fetching catalog document from: {}", url);

        let response = self.client.get(url).send().await?;
        let status = response.status();

        if status == StatusCode::NOT_FOUND {
            return Err(FetchError::NotFound {
                url: url.to_string(),
            });
        }
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        Ok(response.json::<T>().await?)
    }

    /// Fetch the featured list, surfacing every failure to the caller
    pub async fn try_fetch_featured(&self) -> Result<Vec<FeaturedEntry>, FetchError> {
        let list: FeaturedList = self.get_json(&self.featured_url).await?;
        Ok(list.featured)
    }

    /// Fetch one language's fallback entries, surfacing every failure to the caller
    pub async fn try_fetch_for_language(
        &self,
        language_id: &str,
    ) -> Result<Vec<LanguageCatalogEntry>, FetchError> {
        let url = self.language_url(language_id);
        self.get_json(&url).await
    }
}

#[async_trait]
impl RemoteCatalog for HttpCatalog {
    async fn fetch_featured(&self) -> Vec<FeaturedEntry> {
        match self.try_fetch_featured().await {
            Ok(featured) => {
                info!("Fetched {} featured recommendations", featured.len());
                featured
            }
            Err(e) => {
                warn!("Featured catalog unavailable: {}", e);
                self.notifier.info(&format!(
                    "Error while fetching featured recommendations: {}",
                    e
                ));
                Vec::new()
            }
        }
    }

    async fn fetch_for_language(&self, language_id: &str) -> Vec<LanguageCatalogEntry> {
        match self.try_fetch_for_language(language_id).await {
            Ok(entries) => entries,
            Err(e) if e.is_not_found() => {
                debug!("No catalog entry for language '{}'", language_id);
                Vec::new()
            }
            Err(e) => {
                warn!("Language catalog unavailable for '{}': {}", language_id, e);
                self.notifier.info(&format!(
                    "Error while fetching recommendations for '{}': {}",
                    language_id, e
                ));
                Vec::new()
            }
        }
    }
}
