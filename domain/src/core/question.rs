//! Question value object

use super::error::DomainError;
use serde::{Deserialize, Serialize};

/// A question put to the council (Value Object)
///
/// Supplied once per deliberation and never modified afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Question {
    content: String,
}

impl Question {
    /// Try to create a new question, rejecting empty or whitespace-only text
    pub fn try_new(content: impl Into<String>) -> Result<Self, DomainError> {
        let content = content.into();
        if content.trim().is_empty() {
            Err(DomainError::EmptyQuestion)
        } else {
            Ok(Self { content })
        }
    }

    /// Get the question content
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Consume and return the inner content
    pub fn into_content(self) -> String {
        self.content
    }
}

impl std::fmt::Display for Question {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.content)
    }
}

impl TryFrom<&str> for Question {
    type Error = DomainError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        Question::try_new(s)
    }
}

impl TryFrom<String> for Question {
    type Error = DomainError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Question::try_new(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_question_creation() {
        let q = Question::try_new("What is Rust?").unwrap();
        assert_eq!(q.content(), "What is Rust?");
        assert_eq!(q.to_string(), "What is Rust?");
    }

    #[test]
    fn test_question_try_from() {
        let q: Question = "What is Rust?".try_into().unwrap();
        assert_eq!(q.into_content(), "What is Rust?");
    }

    #[test]
    fn test_try_new_empty() {
        assert_eq!(Question::try_new(""), Err(DomainError::EmptyQuestion));
        assert_eq!(Question::try_new("  \n\t"), Err(DomainError::EmptyQuestion));
    }
}
