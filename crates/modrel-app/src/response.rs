// Rust guideline compliant 2026-10-16

//! JSON envelopes for command results.

use crate::error::{AppError, ErrorCode};
use serde::Serialize;

/// Envelope wrapping a successful command result.
#[derive(Debug, Serialize)]
pub struct SuccessEnvelope<T> {
    /// Always `ok`.
    pub status: &'static str,
    /// Workflow outcome.
    pub result: T,
}

impl<T> SuccessEnvelope<T> {
    /// Wraps a workflow outcome.
    #[must_use]
    pub fn new(result: T) -> Self {
        Self { status: "ok", result }
    }
}

/// Envelope describing a failed command.
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
    /// Builds the envelope of an application error.
    #[must_use]
    pub fn from_error(error: &AppError) -> Self {
        Self {
            code: error.code(),
            message: error.to_string(),
            details: error.details(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use modrel_core::Error as CoreError;

    #[test]
    fn test_success_envelope_shape() {
        let value = serde_json::to_value(SuccessEnvelope::new(vec!["1.0.1-testing.1"])).unwrap();
        assert_eq!(
            value,
            serde_json::json!({"status": "ok", "result": ["1.0.1-testing.1"]})
        );
    }

    #[test]
    fn test_error_envelope_omits_empty_details() {
        let envelope = ErrorEnvelope::from_error(&AppError::from(CoreError::AmbiguousRepo));
        let value = serde_json::to_value(&envelope).unwrap();
        assert_eq!(value["code"], "ambiguous_repo");
        assert!(value.get("details").is_none());
    }
}
