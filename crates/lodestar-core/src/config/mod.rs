//! Configuration loading and management

mod loader;
mod recommender_config;

pub use loader::ConfigLoader;
pub use recommender_config::{CatalogConfig, RecommenderConfig, ScanConfig, WorkspaceConfig};
