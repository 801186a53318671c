//! Domain error types

use thiserror::Error;

/// Domain-level errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("session_id is required")]
    MissingSessionId,

    #[error("message is required")]
    EmptyQuestion,

    #[error("Invalid model: {0}")]
    InvalidModel(String),
}

impl DomainError {
    /// Check if this error was caused by missing request fields
    pub fn is_missing_field(&self) -> bool {
        matches!(self, DomainError::MissingSessionId | DomainError::EmptyQuestion)
    }
}
