//! Remote recommendation catalog client for Lodestar
//!
//! Two documents are consumed:
//! - the featured list, a curated set of extensions keyed by target language
//! - the per-language fallback catalog, consulted when nothing installed
//!   already handles a language
//!
//! Both fetches degrade to an empty list on failure. Failures are surfaced
//! through a [`lodestar_core::Notifier`], except a per-language "not found"
//! which simply means the catalog has nothing for that language.

pub mod error;
pub mod http;
pub mod traits;

pub use error::FetchError;
pub use http::HttpCatalog;
pub use traits::RemoteCatalog;
