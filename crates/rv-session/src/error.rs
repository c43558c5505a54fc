//! Error types for session configuration.
//!
//! Request failures never surface here: the controller renders them into
//! the display region. Only setup problems are reported as errors.

use thiserror::Error;

/// Result type for session setup operations.
pub type Result<T> = std::result::Result<T, SessionError>;

/// Errors that can occur while configuring a session.
#[derive(Error, Debug)]
pub enum SessionError {
    /// IO error reading a configuration file.
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Invalid configuration.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}
