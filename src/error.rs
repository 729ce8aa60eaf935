//! Error types for the feed pipeline and the storage backends.
//!
//! Neither kind ever escapes to the page: storage errors degrade to a cache
//! miss or a no-op, fetch errors become the fallback card.

use thiserror::Error;

/// Failure to obtain a usable feed from the proxy.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Request failed: {0}")]
    Network(#[from] reqwest::Error),

    #[error("HTTP error! status: {status}")]
    Http { status: u16 },

    #[error("Malformed proxy response: {0}")]
    Decode(String),

    #[error("RSS feed returned error status: {status}")]
    Rejected { status: String },
}

/// Failure to read or write a key-value store.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Storage unavailable")]
    Unavailable,

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Quota exceeded while writing {key}")]
    QuotaExceeded { key: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
