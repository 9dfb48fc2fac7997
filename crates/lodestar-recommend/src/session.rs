//! Recommendation session
//!
//! One session per IDE session. `start` kicks off the workspace analysis and
//! subscribes to host events; each "sources cloned" signal runs a decision
//! round and each opened document runs the open-file advisor. Both flows
//! await the same write-once analysis snapshot.
//!
//! ```text
//! Idle ──start──▶ Starting ──analysis resolved──▶ Ready
//!                    │                              │
//!                    └──────────── stop ────────────┴──▶ Stopped
//! ```

use crate::advisor::{Advice, OpenFileAdvisor, OpenedDocument};
use crate::analysis::{SharedAnalysis, WorkspaceAnalysis};
use crate::host::{Confirmation, HostEvents, Prompter, Subscription, WorkspaceRoots};
use crate::matcher::match_featured;
use lodestar_catalog::RemoteCatalog;
use lodestar_core::notify::Notifier;
use lodestar_core::Result;
use lodestar_workspace::scanner::DEFAULT_SCAN_TIMEOUT;
use lodestar_workspace::{
    ExtensionScanner, InstalledExtensions, WorkspaceConfigStore, WorkspaceRestarter,
};
use serde::Serialize;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, OnceLock, PoisonError};
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinSet;
use tracing::{debug, info, warn};

/// Everything a session needs from its host
#[derive(Clone)]
pub struct Collaborators {
    pub installed: Arc<dyn InstalledExtensions>,
    pub catalog: Arc<dyn RemoteCatalog>,
    pub scanner: Arc<dyn ExtensionScanner>,
    pub config_store: Arc<dyn WorkspaceConfigStore>,
    pub restarter: Arc<dyn WorkspaceRestarter>,
    pub prompter: Arc<dyn Prompter>,
    pub notifier: Arc<dyn Notifier>,
    pub roots: Arc<dyn WorkspaceRoots>,
}

/// Session tuning
#[derive(Debug, Clone)]
pub struct SessionOptions {
    pub scan_timeout: Duration,
    /// Receives every decision and advice produced by event handlers
    pub outcomes: Option<mpsc::UnboundedSender<SessionOutcome>>,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            scan_timeout: DEFAULT_SCAN_TIMEOUT,
            outcomes: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum SessionState {
    Idle,
    Starting,
    Ready,
    Stopped,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum SkipReason {
    /// `after_clone` ran before `start`
    NotStarted,
    /// Nothing in the featured list matches the workspace
    NoRecommendations,
    /// Another decision round is still running
    DecisionInFlight,
    /// The session was stopped before the round could finish
    Stopped,
}

/// Terminal state of one decision round
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Decision {
    Skipped(SkipReason),
    /// Recommended but declined, nothing written
    Suggested { extensions: Vec<String> },
    Installed {
        extensions: Vec<String>,
        prompted: bool,
        /// False when writing the devfile or requesting the restart failed
        persisted: bool,
    },
}

/// Result of one event handled by a running session
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionOutcome {
    Decision(Decision),
    Advice {
        document: OpenedDocument,
        advice: Advice,
    },
}

/// Clears the in-flight flag when the decision round ends
struct DecisionGuard<'a>(&'a AtomicBool);

impl<'a> DecisionGuard<'a> {
    fn try_acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self(flag))
    }
}

impl Drop for DecisionGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

struct SessionInner {
    collaborators: Collaborators,
    advisor: OpenFileAdvisor,
    scan_timeout: Duration,
    outcomes: Option<mpsc::UnboundedSender<SessionOutcome>>,
    analysis: OnceLock<SharedAnalysis>,
    state: Mutex<SessionState>,
    deciding: AtomicBool,
}

impl SessionInner {
    fn state(&self) -> SessionState {
        *self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn transition(&self, from: SessionState, to: SessionState) -> bool {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        if *state != from {
            return false;
        }
        debug!("Session {:?} -> {:?}", from, to);
        *state = to;
        true
    }

    fn is_stopped(&self) -> bool {
        self.state() == SessionState::Stopped
    }

    fn report(&self, outcome: SessionOutcome) {
        if let Some(tx) = &self.outcomes {
            let _ = tx.send(outcome);
        }
    }

    async fn after_clone(&self) -> Decision {
        if self.is_stopped() {
            debug!("Clone signal after stop, ignoring");
            return Decision::Skipped(SkipReason::Stopped);
        }
        let Some(analysis) = self.analysis.get().cloned() else {
            debug!("Clone signal before start, ignoring");
            return Decision::Skipped(SkipReason::NotStarted);
        };
        let Some(_guard) = DecisionGuard::try_acquire(&self.deciding) else {
            info!("A recommendation decision is already in flight");
            return Decision::Skipped(SkipReason::DecisionInFlight);
        };

        let roots = self.collaborators.roots.roots();
        let scanned = self
            .collaborators
            .scanner
            .find(&roots, self.scan_timeout)
            .await;
        let analysis = analysis.await;
        if self.is_stopped() {
            info!("Session stopped during the workspace scan, dropping the decision");
            return Decision::Skipped(SkipReason::Stopped);
        }

        let extensions = match_featured(&scanned, &analysis.capabilities, &analysis.featured);
        if extensions.is_empty() {
            info!("No featured extensions match this workspace");
            return Decision::Skipped(SkipReason::NoRecommendations);
        }

        if !analysis.devfile_has_extensions {
            info!("Installing recommended extensions: {}", extensions.join(", "));
            let Some(persisted) = self.install(&extensions).await else {
                return Decision::Skipped(SkipReason::Stopped);
            };
            return Decision::Installed {
                extensions,
                prompted: false,
                persisted,
            };
        }

        let question = format!(
            "Do you want to install the recommended extensions {} for your workspace?",
            extensions.join(", ")
        );
        match self.collaborators.prompter.ask(&question).await {
            Confirmation::Yes => match self.install(&extensions).await {
                Some(persisted) => Decision::Installed {
                    extensions,
                    prompted: true,
                    persisted,
                },
                None => Decision::Skipped(SkipReason::Stopped),
            },
            answer => {
                info!("Recommendation declined ({:?})", answer);
                Decision::Suggested { extensions }
            }
        }
    }

    /// Never fails; problems are surfaced to the user instead. `None` when
    /// the session was stopped first, in which case nothing is written.
    async fn install(&self, extensions: &[String]) -> Option<bool> {
        if self.is_stopped() {
            info!("Session stopped, not writing recommended extensions");
            return None;
        }
        let persisted = match self.try_install(extensions).await {
            Ok(()) => true,
            Err(e) => {
                warn!("Installing recommended extensions failed: {}", e);
                self.collaborators.notifier.info(&format!(
                    "Unable to add featured extensions {}: {}",
                    extensions.join(", "),
                    e
                ));
                false
            }
        };
        Some(persisted)
    }

    async fn try_install(&self, extensions: &[String]) -> Result<()> {
        let added = self.collaborators.config_store.add_extensions(extensions).await?;
        if added.is_empty() {
            info!("Recommended extensions are already declared in the workspace configuration");
            return Ok(());
        }
        if self.is_stopped() {
            info!("Session stopped, skipping the workspace restart");
            return Ok(());
        }

        self.collaborators
            .restarter
            .restart(&format!(
                "New featured extensions {} have been added to the workspace to improve language support. \
                 Please restart the workspace to see the changes.",
                added.join(", ")
            ))
            .await
    }

    async fn on_open_file(&self, document: &OpenedDocument) -> Advice {
        if self.is_stopped() {
            return Advice::Stopped;
        }
        let Some(analysis) = self.analysis.get().cloned() else {
            debug!("Document opened before start, ignoring");
            return Advice::NotStarted;
        };
        let analysis = analysis.await;
        if self.is_stopped() {
            return Advice::Stopped;
        }
        let roots = self.collaborators.roots.roots();
        self.advisor.on_open_file(document, &analysis, &roots).await
    }
}

/// Recommendation orchestrator for one IDE session
pub struct RecommendationSession {
    inner: Arc<SessionInner>,
    subscriptions: Vec<Subscription>,
}

impl RecommendationSession {
    pub fn new(collaborators: Collaborators, options: SessionOptions) -> Self {
        let advisor = OpenFileAdvisor::new(
            Arc::clone(&collaborators.catalog),
            Arc::clone(&collaborators.notifier),
        );
        Self {
            inner: Arc::new(SessionInner {
                collaborators,
                advisor,
                scan_timeout: options.scan_timeout,
                outcomes: options.outcomes,
                analysis: OnceLock::new(),
                state: Mutex::new(SessionState::Idle),
                deciding: AtomicBool::new(false),
            }),
            subscriptions: Vec::new(),
        }
    }

    pub fn state(&self) -> SessionState {
        self.inner.state()
    }

    /// Begin the analysis and subscribe to host events.
    ///
    /// Must be called from within a Tokio runtime. Only the first call has
    /// any effect.
    pub fn start(&mut self, events: HostEvents) {
        if !self.inner.transition(SessionState::Idle, SessionState::Starting) {
            warn!("Session already started");
            return;
        }

        let collaborators = &self.inner.collaborators;
        let analysis = WorkspaceAnalysis::shared(
            Arc::clone(&collaborators.catalog),
            Arc::clone(&collaborators.installed),
            Arc::clone(&collaborators.config_store),
        );
        // Fresh session: the lock is empty
        let _ = self.inner.analysis.set(analysis.clone());

        let inner = Arc::clone(&self.inner);
        self.subscriptions
            .push(Subscription::spawn("workspace-analysis", async move {
                analysis.await;
                inner.transition(SessionState::Starting, SessionState::Ready);
            }));

        match events.sources_cloned {
            Some(mut cloned) => {
                let inner = Arc::clone(&self.inner);
                self.subscriptions
                    .push(Subscription::spawn("sources-cloned", async move {
                        // Dropped with the subscription, aborting rounds still in flight
                        let mut rounds = JoinSet::new();
                        while cloned.recv().await.is_some() {
                            while rounds.try_join_next().is_some() {}
                            let inner = Arc::clone(&inner);
                            rounds.spawn(async move {
                                let decision = inner.after_clone().await;
                                inner.report(SessionOutcome::Decision(decision));
                            });
                        }
                        while rounds.join_next().await.is_some() {}
                    }));
            }
            None => info!("No sources-cloned signal available, post-clone recommendations disabled"),
        }

        let mut opened = events.opened_documents;
        let inner = Arc::clone(&self.inner);
        self.subscriptions
            .push(Subscription::spawn("opened-documents", async move {
                let mut handlers = JoinSet::new();
                while let Some(document) = opened.recv().await {
                    while handlers.try_join_next().is_some() {}
                    let inner = Arc::clone(&inner);
                    handlers.spawn(async move {
                        let advice = inner.on_open_file(&document).await;
                        inner.report(SessionOutcome::Advice { document, advice });
                    });
                }
                while handlers.join_next().await.is_some() {}
            }));

        info!("Recommendation session started");
    }

    /// Run one decision round as if the sources had just been cloned
    pub async fn after_clone(&self) -> Decision {
        self.inner.after_clone().await
    }

    /// Run the advisor for one document
    pub async fn on_open_file(&self, document: &OpenedDocument) -> Advice {
        self.inner.on_open_file(document).await
    }

    /// The analysis snapshot, once started
    pub async fn analysis(&self) -> Option<Arc<WorkspaceAnalysis>> {
        let analysis = self.inner.analysis.get().cloned()?;
        Some(analysis.await)
    }

    /// Release all subscriptions and abandon work still in flight. Safe to
    /// call repeatedly, and before `start`.
    pub fn stop(&mut self) {
        {
            let mut state = self
                .inner
                .state
                .lock()
                .unwrap_or_else(PoisonError::into_inner);
            match *state {
                SessionState::Idle => return,
                SessionState::Stopped => {}
                _ => {
                    info!("Recommendation session stopped");
                    *state = SessionState::Stopped;
                }
            }
        }
        // Marked stopped first so rounds racing the abort skip their writes
        for subscription in self.subscriptions.drain(..) {
            subscription.cancel();
        }
    }
}
