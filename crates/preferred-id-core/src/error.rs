// Rust guideline compliant 2026-10-12

//! Error types for the preferred-id core library.

use thiserror::Error;

/// Result type alias for core operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for core operations.
#[derive(Debug, Error)]
pub enum Error {
    /// IO error occurred.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A resource record is malformed or has the wrong shape.
    #[error("Invalid resource: {0}")]
    InvalidResource(String),

    /// Resource not found in the store.
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// Configuration file or environment override is invalid.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}
