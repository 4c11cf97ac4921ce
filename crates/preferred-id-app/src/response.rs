// Rust guideline compliant 2026-10-12

//! Response envelopes for tool and resource outputs.

use crate::error::{AppError, ErrorCode};
use preferred_id_core::{Payload, ResolutionOutcome};
use serde::Serialize;

/// Standard success envelope for tool responses.
#[derive(Debug, Serialize)]
pub struct SuccessEnvelope<T> {
    /// Status indicator.
    pub status: &'static str,
    /// Result payload.
    pub result: T,
}

impl<T> SuccessEnvelope<T> {
    /// Creates a new success envelope.
    #[must_use]
    pub fn new(result: T) -> Self {
        Self { status: "ok", result }
    }
}

/// Status code and payload of one answered `$preferred-id` request.
///
/// Not-found and bad-request outcomes are answers too, so they travel inside a
/// [`SuccessEnvelope`]; only infrastructure failures use [`ErrorEnvelope`].
#[derive(Debug, Clone, Serialize)]
pub struct OperationResult {
    /// Numeric status code (200, 400, 404, 500).
    pub status_code: u16,
    /// `Parameters` or `OperationOutcome` body.
    pub payload: Payload,
}

impl From<&ResolutionOutcome> for OperationResult {
    fn from(outcome: &ResolutionOutcome) -> Self {
        Self {
            status_code: outcome.status().as_u16(),
            payload: outcome.payload(),
        }
    }
}

/// Standard error envelope for tool and resource responses.
#[derive(Debug, Serialize)]
pub struct ErrorEnvelope {
    /// Stable error code.
    pub code: ErrorCode,
    /// Human-readable error message.
    pub message: String,
    /// Optional structured details.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ErrorEnvelope {
    /// Creates a new error envelope from an application error.
    #[must_use]
    pub fn from_error(error: &AppError) -> Self {
        Self {
            code: error.code(),
            message: error.to_string(),
            details: error.details(),
        }
    }
}
