//! Error types for catalog fetches

use thiserror::Error;

/// Failure of a single catalog request
///
/// Never escapes [`crate::RemoteCatalog`]; it decides whether the user is told.
#[derive(Error, Debug)]
pub enum FetchError {
    /// The catalog has no document at this location
    #[error("No catalog document at {url}")]
    NotFound { url: String },

    /// Non-success HTTP status other than 404
    #[error("Catalog request to {url} failed: HTTP {status}")]
    Status { url: String, status: u16 },

    /// Connection, timeout, or body decoding failure
    #[error("Catalog request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// Catalog URL could not be parsed
    #[error("Invalid catalog URL {url}: {message}")]
    InvalidUrl { url: String, message: String },
}

impl FetchError {
    /// Whether this is the benign "nothing for this language" response
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}
