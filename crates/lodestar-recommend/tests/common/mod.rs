//! Common test helpers for lodestar-recommend integration tests

#![allow(dead_code)]

pub mod mocks;

pub use mocks::*;

use lodestar_core::types::ExtensionManifest;
use lodestar_recommend::{Collaborators, Confirmation, RecommendationSession, SessionOptions};
use lodestar_workspace::StaticExtensions;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

pub const PROJECTS_ROOT: &str = "/projects";

/// The built-in Java grammar extension: declares `.java` but activates nothing
pub fn java_grammar() -> ExtensionManifest {
    ExtensionManifest::new("vscode.java").with_language("java", &[".java", ".class"])
}

pub fn python_grammar() -> ExtensionManifest {
    ExtensionManifest::new("vscode.python").with_language("python", &[".py"])
}

/// A fully mocked host, with handles kept for assertions
pub struct TestHost {
    pub installed: Vec<ExtensionManifest>,
    pub catalog: Arc<MockCatalog>,
    pub scanner: Arc<MockScanner>,
    pub store: Arc<MockConfigStore>,
    pub restarter: Arc<MockRestarter>,
    pub prompter: Arc<ScriptedPrompter>,
    pub notifier: Arc<RecordingNotifier>,
    pub roots: Vec<PathBuf>,
}

impl TestHost {
    pub fn new() -> Self {
        Self {
            installed: Vec::new(),
            catalog: Arc::new(MockCatalog::new()),
            scanner: Arc::new(MockScanner::new(&[])),
            store: Arc::new(MockConfigStore::empty()),
            restarter: Arc::new(MockRestarter::default()),
            prompter: Arc::new(ScriptedPrompter::answering(Confirmation::No)),
            notifier: Arc::new(RecordingNotifier::default()),
            roots: vec![PathBuf::from(PROJECTS_ROOT)],
        }
    }

    pub fn installed(mut self, manifests: Vec<ExtensionManifest>) -> Self {
        self.installed = manifests;
        self
    }

    pub fn catalog(mut self, catalog: MockCatalog) -> Self {
        self.catalog = Arc::new(catalog);
        self
    }

    pub fn scanner(mut self, scanner: MockScanner) -> Self {
        self.scanner = Arc::new(scanner);
        self
    }

    pub fn store(mut self, store: MockConfigStore) -> Self {
        self.store = Arc::new(store);
        self
    }

    pub fn restarter(mut self, restarter: MockRestarter) -> Self {
        self.restarter = Arc::new(restarter);
        self
    }

    pub fn answering(mut self, answer: Confirmation) -> Self {
        self.prompter = Arc::new(ScriptedPrompter::answering(answer));
        self
    }

    pub fn collaborators(&self) -> Collaborators {
        Collaborators {
            installed: Arc::new(StaticExtensions(self.installed.clone())),
            catalog: self.catalog.clone(),
            scanner: self.scanner.clone(),
            config_store: self.store.clone(),
            restarter: self.restarter.clone(),
            prompter: self.prompter.clone(),
            notifier: self.notifier.clone(),
            roots: Arc::new(self.roots.clone()),
        }
    }

    pub fn session(&self) -> RecommendationSession {
        RecommendationSession::new(
            self.collaborators(),
            SessionOptions {
                scan_timeout: Duration::from_millis(500),
                outcomes: None,
            },
        )
    }

    pub fn session_with_outcomes(
        &self,
    ) -> (
        RecommendationSession,
        tokio::sync::mpsc::UnboundedReceiver<lodestar_recommend::SessionOutcome>,
    ) {
        let (tx, rx) = tokio::sync::mpsc::unbounded_channel();
        let session = RecommendationSession::new(
            self.collaborators(),
            SessionOptions {
                scan_timeout: Duration::from_millis(500),
                outcomes: Some(tx),
            },
        );
        (session, rx)
    }
}

/// Poll until the session reaches `state`, failing after one second
pub async fn wait_for_state(session: &RecommendationSession, state: lodestar_recommend::SessionState) {
    let deadline = tokio::time::Instant::now() + Duration::from_secs(1);
    while session.state() != state {
        assert!(
            tokio::time::Instant::now() < deadline,
            "session stuck in {:?}, expected {:?}",
            session.state(),
            state
        );
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
}

/// Next outcome reported by a running session, failing after one second
pub async fn next_outcome(
    outcomes: &mut tokio::sync::mpsc::UnboundedReceiver<lodestar_recommend::SessionOutcome>,
) -> lodestar_recommend::SessionOutcome {
    tokio::time::timeout(Duration::from_secs(1), outcomes.recv())
        .await
        .expect("timed out waiting for a session outcome")
        .expect("outcome channel closed")
}
