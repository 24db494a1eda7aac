//! Error types for the insight engine

use thiserror::Error;

/// Errors that can occur while deriving insights.
///
/// Insufficient or sparse history is never an error: affected report fields
/// degrade to their sentinel values instead. This enum covers the real
/// failure seams only.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Failed to parse workout snapshot: {0}")]
    ParseError(String),

    #[error("Invalid JSON: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Missing required field: {0}")]
    MissingField(String),

    #[error("Date parse error: {0}")]
    DateParseError(String),

    #[error("Encoding error: {0}")]
    EncodingError(String),

    #[error("Narrative collaborator unavailable: {0}")]
    CollaboratorUnavailable(String),
}
