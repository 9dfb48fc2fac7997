//! Mock host collaborators
//!
//! Each mock records what the session asked of it so tests can assert on
//! prompts, writes, restarts and notifications without touching the network
//! or the filesystem.

#![allow(dead_code)]

use async_trait::async_trait;
use lodestar_catalog::RemoteCatalog;
use lodestar_core::types::{FeaturedEntry, LanguageCatalogEntry};
use lodestar_core::{Error, Notifier, Result};
use lodestar_recommend::{Confirmation, Prompter};
use lodestar_workspace::{ExtensionScanner, ScannedExtensions, WorkspaceConfigStore, WorkspaceRestarter};
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

/// Notifier that records every message
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    messages: Mutex<Vec<String>>,
}

impl RecordingNotifier {
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

/// Catalog serving fixed documents
#[derive(Debug, Default)]
pub struct MockCatalog {
    featured: Vec<FeaturedEntry>,
    by_language: HashMap<String, Vec<LanguageCatalogEntry>>,
    featured_delay: Option<Duration>,
    featured_calls: AtomicUsize,
    language_requests: Mutex<Vec<String>>,
}

impl MockCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_featured(mut self, id: &str, on_language: &[&str]) -> Self {
        self.featured.push(FeaturedEntry::new(id, on_language));
        self
    }

    pub fn with_language(mut self, language_id: &str, category: &str, ids: &[&str]) -> Self {
        self.by_language
            .entry(language_id.to_string())
            .or_default()
            .push(LanguageCatalogEntry::new(category, ids));
        self
    }

    pub fn with_featured_delay(mut self, delay: Duration) -> Self {
        self.featured_delay = Some(delay);
        self
    }

    pub fn featured_calls(&self) -> usize {
        self.featured_calls.load(Ordering::SeqCst)
    }

    pub fn language_requests(&self) -> Vec<String> {
        self.language_requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl RemoteCatalog for MockCatalog {
    async fn fetch_featured(&self) -> Vec<FeaturedEntry> {
        self.featured_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.featured_delay {
            tokio::time::sleep(delay).await;
        }
        self.featured.clone()
    }

    async fn fetch_for_language(&self, language_id: &str) -> Vec<LanguageCatalogEntry> {
        self.language_requests
            .lock()
            .unwrap()
            .push(language_id.to_string());
        self.by_language.get(language_id).cloned().unwrap_or_default()
    }
}

/// Scanner returning a fixed extension set
#[derive(Debug, Default)]
pub struct MockScanner {
    extensions: ScannedExtensions,
    delay: Option<Duration>,
    calls: AtomicUsize,
    timeouts: Mutex<Vec<Duration>>,
}

impl MockScanner {
    pub fn new(extensions: &[&str]) -> Self {
        Self {
            extensions: extensions.iter().map(|e| e.to_string()).collect(),
            ..Default::default()
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn timeouts(&self) -> Vec<Duration> {
        self.timeouts.lock().unwrap().clone()
    }
}

#[async_trait]
impl ExtensionScanner for MockScanner {
    async fn find(&self, _roots: &[PathBuf], timeout: Duration) -> ScannedExtensions {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.timeouts.lock().unwrap().push(timeout);
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        self.extensions.clone()
    }
}

/// In-memory workspace configuration
#[derive(Debug, Default)]
pub struct MockConfigStore {
    declared: Mutex<Vec<String>>,
    fail_reads: bool,
    fail_writes: bool,
    writes: Mutex<Vec<Vec<String>>>,
}

impl MockConfigStore {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn with_declared(ids: &[&str]) -> Self {
        Self {
            declared: Mutex::new(ids.iter().map(|id| id.to_string()).collect()),
            ..Default::default()
        }
    }

    pub fn failing_reads(mut self) -> Self {
        self.fail_reads = true;
        self
    }

    pub fn failing_writes(mut self) -> Self {
        self.fail_writes = true;
        self
    }

    /// Every non-empty batch appended to the configuration
    pub fn writes(&self) -> Vec<Vec<String>> {
        self.writes.lock().unwrap().clone()
    }

    pub fn declared(&self) -> Vec<String> {
        self.declared.lock().unwrap().clone()
    }
}

#[async_trait]
impl WorkspaceConfigStore for MockConfigStore {
    async fn has_extensions(&self) -> Result<bool> {
        if self.fail_reads {
            return Err(Error::devfile_update("devfile.yaml", "unreadable"));
        }
        Ok(!self.declared.lock().unwrap().is_empty())
    }

    async fn extension_ids(&self) -> Result<Vec<String>> {
        Ok(self.declared())
    }

    async fn add_extensions(&self, ids: &[String]) -> Result<Vec<String>> {
        if self.fail_writes {
            return Err(Error::devfile_update("devfile.yaml", "read-only file system"));
        }
        let mut declared = self.declared.lock().unwrap();
        let mut added = Vec::new();
        for id in ids {
            if !declared.contains(id) && !added.contains(id) {
                added.push(id.clone());
            }
        }
        declared.extend(added.iter().cloned());
        if !added.is_empty() {
            self.writes.lock().unwrap().push(added.clone());
        }
        Ok(added)
    }
}

/// Restarter that records its messages
#[derive(Debug, Default)]
pub struct MockRestarter {
    messages: Mutex<Vec<String>>,
    fail: bool,
}

impl MockRestarter {
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Default::default()
        }
    }

    pub fn messages(&self) -> Vec<String> {
        self.messages.lock().unwrap().clone()
    }
}

#[async_trait]
impl WorkspaceRestarter for MockRestarter {
    async fn restart(&self, message: &str) -> Result<()> {
        self.messages.lock().unwrap().push(message.to_string());
        if self.fail {
            return Err(Error::invalid_config("restart endpoint unavailable"));
        }
        Ok(())
    }
}

/// Prompter giving the same answer every time
#[derive(Debug)]
pub struct ScriptedPrompter {
    answer: Confirmation,
    prompts: Mutex<Vec<String>>,
}

impl ScriptedPrompter {
    pub fn answering(answer: Confirmation) -> Self {
        Self {
            answer,
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl Prompter for ScriptedPrompter {
    async fn ask(&self, message: &str) -> Confirmation {
        self.prompts.lock().unwrap().push(message.to_string());
        self.answer
    }
}
