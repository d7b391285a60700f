// Boundary errors raised when untyped input is turned into typed values.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum RulesError {
    #[error("unknown sport: {0}")]
    UnknownSport(String),

    #[error("unknown scoring format: {0}")]
    UnknownFormat(String),

    #[error("invalid rules document, field `{field}`: {message}")]
    InvalidRules { field: String, message: String },

    #[error("failed to parse rules document: {0}")]
    Json(#[from] serde_json::Error),
}
