//! HTTP completion adapter
//!
//! Implements [`CompletionService`] against any OpenAI-compatible
//! chat-completions endpoint (Hugging Face Inference by default).

use super::wire::{ChatMessage, ChatRequest, ChatResponse};
use crate::config::ProviderSettings;
use async_trait::async_trait;
use council_application::{CompletionError, CompletionService};
use council_domain::{AgentId, Message, truncate};
use reqwest::Client;
use tracing::debug;

/// Chat-completions client shared by every agent of the council
///
/// The agent id is sent as the `model` field; one client serves all agents.
#[derive(Debug, Clone)]
pub struct HttpCompletionService {
    client: Client,
    settings: ProviderSettings,
}

impl HttpCompletionService {
    pub fn new(settings: ProviderSettings) -> Result<Self, CompletionError> {
        let client = Client::builder()
            .timeout(settings.timeout)
            .build()
            .map_err(|e| CompletionError::Other(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { client, settings })
    }

    pub fn endpoint(&self) -> &str {
        &self.settings.base_url
    }
}

#[async_trait]
impl CompletionService for HttpCompletionService {
    async fn complete(
        &self,
        agent: &AgentId,
        messages: &[Message],
        max_output_tokens: u32,
    ) -> Result<String, CompletionError> {
        let request = ChatRequest {
            model: agent.as_str(),
            messages: messages.iter().map(ChatMessage::from).collect(),
            max_tokens: max_output_tokens,
            stream: false,
            temperature: self.settings.temperature,
        };

        debug!(agent = %agent, "POST {} ({} messages)", self.settings.base_url, messages.len());

        let response = self
            .client
            .post(&self.settings.base_url)
            .bearer_auth(&self.settings.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    CompletionError::Timeout
                } else {
                    CompletionError::Transport(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(CompletionError::Status {
                status: status.as_u16(),
                body: truncate(&body, 300),
            });
        }

        let parsed: ChatResponse = response
            .json()
            .await
            .map_err(|e| CompletionError::MalformedResponse(e.to_string()))?;

        let content = parsed.first_content().ok_or_else(|| {
            CompletionError::MalformedResponse("missing choices[0].message.content".to_string())
        })?;

        let content = content.trim();
        if content.is_empty() {
            return Err(CompletionError::EmptyContent);
        }
        Ok(content.to_string())
    }
}
