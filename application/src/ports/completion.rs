//! Completion service port
//!
//! Defines the interface for executing one prompt against one named agent.

use async_trait::async_trait;
use council_domain::{AgentId, Message};
use thiserror::Error;

/// Errors that can occur while calling the completion service
///
/// The deliberation treats every variant the same way: as a failed call.
/// The distinction only exists for logs.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CompletionError {
    #[error("Timeout")]
    Timeout,

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Request failed with status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    #[error("Empty content")]
    EmptyContent,

    #[error("Other error: {0}")]
    Other(String),
}

/// Port for text completion
///
/// Implementations (adapters) live in the infrastructure layer and must
/// tolerate concurrent calls for distinct agents.
#[async_trait]
pub trait CompletionService: Send + Sync {
    /// Run `messages` against `agent`, returning the generated text
    async fn complete(
        &self,
        agent: &AgentId,
        messages: &[Message],
        max_output_tokens: u32,
    ) -> Result<String, CompletionError>;
}
