//! # lodestar-core
//!
//! Core library for Lodestar providing:
//! - Extension manifest, catalog, and devfile types
//! - Hierarchical configuration loading (defaults, file, environment)
//! - The shared error type
//! - The notification seam used to surface non-fatal messages to the user

pub mod config;
pub mod error;
pub mod notify;
pub mod types;
pub mod utils;

pub use config::{ConfigLoader, RecommenderConfig};
pub use error::{Error, Result};
pub use notify::{Notifier, TracingNotifier};
pub use utils::get_home_dir;
