//! Common test helpers for lodestar-catalog integration tests
//!
//! - `RecordingNotifier` captures user-visible messages for assertions
//! - Wiremock helpers mount catalog documents on a mock server

#![allow(dead_code)]

use lodestar_core::config::CatalogConfig;
use lodestar_core::Notifier;
use lodestar_catalog::HttpCatalog;
use std::sync::{Arc, Mutex};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const LANGUAGE_PREFIX: &str = "/recommendations/language";
pub const FEATURED_PATH: &str = "/featured.json";

/// Notifier that records every message
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    messages: Mutex<Vec<String>>,
}

impl RecordingNotifier {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn messages(&self) -> Vec<String> {
        self.messages.lock().unwrap().clone()
    }

    pub fn count(&self) -> usize {
        self.messages.lock().unwrap().len()
    }
}

impl Notifier for RecordingNotifier {
    fn info(&self, message: &str) {
        self.messages.lock().unwrap().push(message.to_string());
    }
}

/// Build a catalog client pointed at the mock server
pub fn catalog_for(server: &MockServer, notifier: Arc<RecordingNotifier>) -> HttpCatalog {
    let config = CatalogConfig {
        featured_url: format!("{}{}", server.uri(), FEATURED_PATH),
        language_base_url: format!("{}{}", server.uri(), LANGUAGE_PREFIX),
        http_timeout_secs: 5,
        ..Default::default()
    };
    HttpCatalog::new(&config, notifier).unwrap()
}

/// Serve the featured document
pub async fn mock_featured(server: &MockServer, body: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path(FEATURED_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

/// Serve a per-language document
pub async fn mock_language(server: &MockServer, language_id: &str, body: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path(format!("{}/{}.json", LANGUAGE_PREFIX, language_id)))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

/// Answer any request for `request_path` with a bare status code
pub async fn mock_status(server: &MockServer, request_path: &str, status: u16) {
    Mock::given(method("GET"))
        .and(path(request_path))
        .respond_with(ResponseTemplate::new(status))
        .mount(server)
        .await;
}
