// Rust guideline compliant 2026-10-12

//! Error handling for preferred-id application services.

use preferred_id_core::Error as CoreError;
use serde::Serialize;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for application-level operations.
pub type Result<T> = std::result::Result<T, AppError>;

/// Stable error codes for tool and resource responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    /// The requested resource was not found.
    NotFound,
    /// A resource record failed validation or decoding.
    ValidationError,
    /// Configuration is invalid.
    ConfigError,
    /// IO failure while reading or writing repository data.
    IoError,
    /// The repository has not been initialized.
    RepoNotInitialized,
    /// The request included invalid inputs.
    InvalidInput,
    /// The search provider failed.
    SearchFailed,
    /// JSON serialization or parsing failed.
    JsonError,
}

/// Application-level errors with stable mapping to error codes.
#[derive(Debug, Error)]
pub enum AppError {
    /// Repository is missing or not initialized.
    #[error("Preferred-id repository not initialized at {path}. Run 'pid init' first.")]
    RepoNotInitialized {
        /// Path where `.preferred-id` was expected.
        path: PathBuf,
    },

    /// Invalid input was provided by the caller.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// The search provider could not answer a query.
    #[error("Search failed: {0}")]
    SearchFailed(String),

    /// Error from core library operations.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// IO error not represented by core errors.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl AppError {
    /// Returns a stable error code for the error.
    #[must_use]
    pub fn code(&self) -> ErrorCode {
        match self {
            AppError::RepoNotInitialized { .. } => ErrorCode::RepoNotInitialized,
            AppError::InvalidInput(_) => ErrorCode::InvalidInput,
            AppError::SearchFailed(_) => ErrorCode::SearchFailed,
            AppError::Io(_) => ErrorCode::IoError,
            AppError::Core(core) => match core {
                CoreError::NotFound(_) => ErrorCode::NotFound,
                CoreError::InvalidResource(_) => ErrorCode::ValidationError,
                CoreError::InvalidConfig(_) => ErrorCode::ConfigError,
                CoreError::Io(_) => ErrorCode::IoError,
                CoreError::Json(_) => ErrorCode::JsonError,
            },
        }
    }

    /// Returns structured details for errors that benefit from extra context.
    #[must_use]
    pub fn details(&self) -> Option<serde_json::Value> {
        match self {
            AppError::RepoNotInitialized { path } => Some(serde_json::json!({
                "path": path,
            })),
            _ => None,
        }
    }
}
