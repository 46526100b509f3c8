// File: src/error.rs
use thiserror::Error;

/// Failure of a single call to the evaluation backend.
///
/// Every variant is recoverable: callers log it and fall back to a
/// user-visible placeholder. Nothing retries.
#[derive(Error, Debug)]
pub enum GatewayError {
    #[error("request to {path} failed: {source}")]
    Transport {
        path: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{path} answered with HTTP {status}")]
    Status { path: String, status: u16 },

    #[error("malformed response from {path}: {reason}")]
    Malformed { path: String, reason: String },

    /// Used by in-process gateways (scripted hosts, tests).
    #[error("gateway unavailable: {0}")]
    Unavailable(String),
}

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("could not encode value for key {key}: {source}")]
    Serialize {
        key: String,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Error, Debug)]
pub enum LexiconError {
    #[error("could not read lexicon: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid lexicon file: {0}")]
    Parse(#[from] serde_json::Error),
}
