//! Per-round answers

use crate::core::agent::AgentId;
use serde::{Deserialize, Serialize};

/// Text substituted for an answer the agent failed to produce
pub const FAILED_ANSWER: &str = "Failed to generate answer.";

/// Whether a completion call produced usable text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CallStatus {
    Ok,
    Failed,
}

impl CallStatus {
    pub fn is_ok(&self) -> bool {
        matches!(self, CallStatus::Ok)
    }
}

/// One agent's answer in one round
///
/// A failed answer carries [`FAILED_ANSWER`] as its text but still occupies a
/// slot: it is voted on, can be eliminated, and is archived like any other.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Answer {
    pub agent: AgentId,
    pub round: u32,
    pub text: String,
    pub status: CallStatus,
}

impl Answer {
    pub fn ok(agent: AgentId, round: u32, text: impl Into<String>) -> Self {
        Self {
            agent,
            round,
            text: text.into(),
            status: CallStatus::Ok,
        }
    }

    pub fn failed(agent: AgentId, round: u32) -> Self {
        Self {
            agent,
            round,
            text: FAILED_ANSWER.to_string(),
            status: CallStatus::Failed,
        }
    }

    /// Build from a completion outcome; `None` means the call failed
    pub fn from_outcome(agent: AgentId, round: u32, text: Option<String>) -> Self {
        match text {
            Some(text) => Self::ok(agent, round, text),
            None => Self::failed(agent, round),
        }
    }

    pub fn is_ok(&self) -> bool {
        self.status.is_ok()
    }
}
