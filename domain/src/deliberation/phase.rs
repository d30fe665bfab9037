//! Deliberation phases

use serde::{Deserialize, Serialize};

/// Phase of the deliberation state machine
///
/// ```text
/// Answering ──(2 active)──────────────────────────► Ensemble ──► Done
///     │                                                ▲
///     └──(3+ active)──► Voting ──► Arbitrating ──(1 left)┘
///                                      │
///                                      └──(2+ left)──► Answering
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// Every active agent answers (or refines its previous answer)
    Answering,
    /// Every active agent votes for the worst anonymized answer
    Voting,
    /// The arbiter eliminates exactly one agent
    #[serde(rename = "arbiter")]
    Arbitrating,
    /// Survivor answers and the archive are merged into one result
    Ensemble,
    /// Terminal
    Done,
}

impl Phase {
    pub fn as_str(&self) -> &str {
        match self {
            Phase::Answering => "answering",
            Phase::Voting => "voting",
            Phase::Arbitrating => "arbiter",
            Phase::Ensemble => "ensemble",
            Phase::Done => "done",
        }
    }

    /// Human-readable name; answering after round 1 is a re-evaluation
    pub fn display_name(&self, round: u32) -> &str {
        match self {
            Phase::Answering if round > 1 => "Re-evaluating",
            Phase::Answering => "Answering",
            Phase::Voting => "Voting",
            Phase::Arbitrating => "Arbiter Decision",
            Phase::Ensemble => "Ensemble Synthesis",
            Phase::Done => "Done",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, Phase::Done)
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
