//! Workspace restart requests

use async_trait::async_trait;
use lodestar_core::{Notifier, Result};
use std::sync::Arc;
use tracing::info;

/// Host capability to restart the workspace so new extensions load
#[async_trait]
pub trait WorkspaceRestarter: Send + Sync {
    /// Request a restart, explaining why with `message`
    async fn restart(&self, message: &str) -> Result<()>;
}

/// Restarter for hosts that cannot restart themselves: it asks the user to
#[derive(Clone)]
pub struct NotifyingRestarter {
    notifier: Arc<dyn Notifier>,
}

impl NotifyingRestarter {
    pub fn new(notifier: Arc<dyn Notifier>) -> Self {
        Self { notifier }
    }
}

#[async_trait]
impl WorkspaceRestarter for NotifyingRestarter {
    async fn restart(&self, message: &str) -> Result<()> {
        info!("Workspace restart requested");
        self.notifier.info(message);
        Ok(())
    }
}
