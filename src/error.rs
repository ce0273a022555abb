//! Error types for fingerprint management and persistence

use thiserror::Error;

/// Errors surfaced by the account store
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("IO error on {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid account store {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to serialize account store: {0}")]
    Serialize(#[source] serde_json::Error),
}

/// Fingerprint lifecycle errors
#[derive(Error, Debug)]
pub enum FingerprintError {
    #[error("Account not found: {0}")]
    AccountNotFound(String),

    #[error("History index {index} out of range (history has {len} entries)")]
    OutOfRange { index: usize, len: usize },

    #[error("Invalid header value for {name}")]
    InvalidHeader { name: &'static str },

    #[error("Invalid product identity {value:?}: {reason}")]
    InvalidProduct { value: String, reason: &'static str },

    #[error("Invalid user agent pattern: {0}")]
    InvalidPattern(#[from] regex::Error),

    #[error(transparent)]
    Store(#[from] StoreError),
}

pub type Result<T> = std::result::Result<T, FingerprintError>;
