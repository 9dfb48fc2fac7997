//! Recommendation inference engine for Lodestar
//!
//! This crate handles:
//! - Indexing installed extensions by language and file extension
//! - Matching scanned workspace extensions against the featured catalog
//! - Advising on fallback extensions when a file in an uncovered language opens
//! - The per-session state machine that installs or suggests recommendations

pub mod advisor;
pub mod analysis;
pub mod capability;
pub mod host;
pub mod matcher;
pub mod session;

pub use advisor::{Advice, OpenFileAdvisor, OpenedDocument};
pub use analysis::{SharedAnalysis, WorkspaceAnalysis};
pub use capability::CapabilityIndex;
pub use host::{
    Confirmation, HostEventSender, HostEvents, Prompter, SourcesCloned, Subscription, WorkspaceRoots,
};
pub use matcher::match_featured;
pub use session::{
    Collaborators, Decision, RecommendationSession, SessionOptions, SessionOutcome, SessionState,
    SkipReason,
};
