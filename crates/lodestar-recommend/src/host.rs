//! Host collaborator seams
//!
//! The embedding host supplies workspace roots, a yes/no prompt and two
//! event streams. Event subscriptions are spawned tasks owned by a
//! [`Subscription`] handle; cancelling or dropping the handle aborts them.

use crate::advisor::OpenedDocument;
use async_trait::async_trait;
use std::path::PathBuf;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::debug;

/// Answer to a yes/no prompt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Confirmation {
    Yes,
    No,
    /// Closed without choosing
    Dismissed,
}

/// User-facing yes/no prompt
#[async_trait]
pub trait Prompter: Send + Sync {
    async fn ask(&self, message: &str) -> Confirmation;
}

/// Current workspace roots
pub trait WorkspaceRoots: Send + Sync {
    fn roots(&self) -> Vec<PathBuf>;
}

impl WorkspaceRoots for Vec<PathBuf> {
    fn roots(&self) -> Vec<PathBuf> {
        self.clone()
    }
}

/// Fired once the project sources have been cloned into the workspace
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SourcesCloned;

/// Event streams handed to a session on start
#[derive(Debug)]
pub struct HostEvents {
    /// Absent when the host has no workspace-setup collaborator
    pub sources_cloned: Option<mpsc::UnboundedReceiver<SourcesCloned>>,
    pub opened_documents: mpsc::UnboundedReceiver<OpenedDocument>,
}

/// Sending half of [`HostEvents`], kept by the host
#[derive(Debug, Clone)]
pub struct HostEventSender {
    sources_cloned: Option<mpsc::UnboundedSender<SourcesCloned>>,
    opened_documents: mpsc::UnboundedSender<OpenedDocument>,
}

impl HostEvents {
    /// Channels for a host that emits both signals
    pub fn channel() -> (HostEventSender, Self) {
        let (clone_tx, clone_rx) = mpsc::unbounded_channel();
        let (open_tx, open_rx) = mpsc::unbounded_channel();
        (
            HostEventSender {
                sources_cloned: Some(clone_tx),
                opened_documents: open_tx,
            },
            Self {
                sources_cloned: Some(clone_rx),
                opened_documents: open_rx,
            },
        )
    }

    /// Channels for a host without a workspace-setup collaborator
    pub fn without_clone_signal() -> (HostEventSender, Self) {
        let (open_tx, open_rx) = mpsc::unbounded_channel();
        (
            HostEventSender {
                sources_cloned: None,
                opened_documents: open_tx,
            },
            Self {
                sources_cloned: None,
                opened_documents: open_rx,
            },
        )
    }
}

impl HostEventSender {
    /// Returns false when the signal is unsupported or the session is gone
    pub fn sources_cloned(&self) -> bool {
        self.sources_cloned
            .as_ref()
            .is_some_and(|tx| tx.send(SourcesCloned).is_ok())
    }

    /// Returns false when the session is gone
    pub fn document_opened(&self, document: OpenedDocument) -> bool {
        self.opened_documents.send(document).is_ok()
    }
}

/// Cancellation handle for one event subscription
#[derive(Debug)]
pub struct Subscription {
    name: &'static str,
    handle: JoinHandle<()>,
}

impl Subscription {
    pub fn spawn<F>(name: &'static str, task: F) -> Self
    where
        F: std::future::Future<Output = ()> + Send + 'static,
    {
        Self {
            name,
            handle: tokio::spawn(task),
        }
    }

    pub fn cancel(self) {
        debug!("Cancelling subscription '{}'", self.name);
        // Drop aborts
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
