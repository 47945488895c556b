//! Error types for the storefront cache layer

use thiserror::Error;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in the cache layer
#[derive(Error, Debug)]
pub enum Error {
    /// The injected fetcher failed while no usable cached value existed.
    ///
    /// Only raised on the synchronous fetch path (cache miss or full
    /// expiry). Fetcher failures during background revalidation are logged
    /// and swallowed, never surfaced through this variant.
    #[error("fetch for key '{key}' failed: {source}")]
    Fetch {
        key: String,
        #[source]
        source: anyhow::Error,
    },

    /// Cache options rejected at validation time
    #[error("invalid cache options: {0}")]
    InvalidOptions(String),
}
