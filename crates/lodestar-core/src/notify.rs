//! User-facing notification seam
//!
//! Degraded paths (catalog outages, failed devfile writes) and advisory
//! messages are surfaced through a [`Notifier`]. Hosts decide how the
//! message reaches the user: a message box, a terminal line, a log record.

use tracing::info;

/// Sink for non-fatal, user-visible messages
pub trait Notifier: Send + Sync {
    /// Show an informational message
    fn info(&self, message: &str);
}

/// Notifier that only records messages in the tracing log
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn info(&self, message: &str) {
        info!(target: "lodestar::notify", "{}", message);
    }
}
