//! Error types for the report fetch boundary.
//!
//! Every failure reaching either endpoint collapses into one of three kinds:
//! - Transport: the server could not be reached or the connection broke
//! - Status: the server answered with a non-2xx status
//! - Decode: the body was not a valid report bundle
//!
//! The `Display` text of these errors is what the session controller shows
//! in the report pane when a generate request fails, so it is kept short.

use thiserror::Error;

/// Result type for fetch boundary operations.
pub type FetchResult<T> = std::result::Result<T, FetchError>;

/// Errors that can occur while talking to the report server.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    /// Network-level failure (connection refused, timeout, DNS).
    #[error("{0}")]
    Transport(String),

    /// Non-success HTTP status.
    #[error("Response status: {0}")]
    Status(u16),

    /// Response body could not be decoded.
    #[error("invalid response body: {0}")]
    Decode(String),
}

impl FetchError {
    /// Short machine-readable kind, used as a structured log field.
    pub fn kind(&self) -> &'static str {
        match self {
            FetchError::Transport(_) => "transport",
            FetchError::Status(_) => "status",
            FetchError::Decode(_) => "decode",
        }
    }

    /// HTTP status code, if the server answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            FetchError::Status(code) => Some(*code),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for FetchError {
    fn from(err: serde_json::Error) -> Self {
        FetchError::Decode(err.to_string())
    }
}
