//! Arbiter elimination decisions

use crate::core::agent::AgentId;
use serde::{Deserialize, Serialize};

/// Reasoning recorded when the arbiter call itself failed
pub const ARBITER_CALL_FAILED: &str = "Failed to get arbiter decision";

/// How the eliminated agent was determined
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Resolution {
    /// An active agent id was recognized in the arbiter's decision text
    Parsed,
    /// The call failed or nothing was recognized; the last active agent was taken
    Fallback,
}

impl Resolution {
    pub fn as_str(&self) -> &str {
        match self {
            Resolution::Parsed => "parsed",
            Resolution::Fallback => "fallback",
        }
    }
}

/// The arbiter's verdict for one round
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EliminationDecision {
    pub round: u32,
    pub eliminated: AgentId,
    pub reasoning: String,
    pub resolution: Resolution,
}

impl EliminationDecision {
    pub fn parsed(round: u32, eliminated: AgentId, reasoning: impl Into<String>) -> Self {
        Self {
            round,
            eliminated,
            reasoning: reasoning.into(),
            resolution: Resolution::Parsed,
        }
    }

    /// Deterministic fallback: eliminate the given (last active) agent
    pub fn fallback(round: u32, eliminated: AgentId) -> Self {
        let reasoning = format!("Arbiter failed to decide. Fallback elimination: {eliminated}");
        Self {
            round,
            eliminated,
            reasoning,
            resolution: Resolution::Fallback,
        }
    }

    pub fn is_fallback(&self) -> bool {
        self.resolution == Resolution::Fallback
    }
}
