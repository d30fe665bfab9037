//! Domain error types

use thiserror::Error;

/// Domain-level errors
///
/// Every variant except [`DomainError::Cancelled`] is a configuration error:
/// it is detected before the first round starts and ends the request.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Question cannot be empty")]
    EmptyQuestion,

    #[error("No council members configured")]
    EmptyRoster,

    #[error("Agent id cannot be empty")]
    InvalidAgent,

    #[error("Agent '{0}' appears more than once in the roster")]
    DuplicateAgent(String),

    #[error("Operation cancelled")]
    Cancelled,
}

impl DomainError {
    /// Check if this error represents a cancellation
    pub fn is_cancelled(&self) -> bool {
        matches!(self, DomainError::Cancelled)
    }

    /// Check if this error was raised while validating the council setup
    pub fn is_configuration(&self) -> bool {
        !self.is_cancelled()
    }
}
