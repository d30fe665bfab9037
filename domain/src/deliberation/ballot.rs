//! Anonymized peer voting artifacts
//!
//! Votes are collected against ordinal labels ("Answer #k") rather than
//! agent ids. No tally happens here: the raw vote text and the
//! ordinal-to-agent map are forwarded to the arbiter as-is.

use super::answer::CallStatus;
use crate::core::agent::AgentId;
use serde::{Deserialize, Serialize};

/// Text recorded for a voter whose completion call failed
pub const FAILED_VOTE: &str = "Failed to vote";

/// One voter's raw ballot
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BallotEntry {
    pub voter: AgentId,
    pub raw_vote: String,
    pub status: CallStatus,
}

impl BallotEntry {
    pub fn ok(voter: AgentId, raw_vote: impl Into<String>) -> Self {
        Self {
            voter,
            raw_vote: raw_vote.into(),
            status: CallStatus::Ok,
        }
    }

    pub fn failed(voter: AgentId) -> Self {
        Self {
            voter,
            raw_vote: FAILED_VOTE.to_string(),
            status: CallStatus::Failed,
        }
    }

    /// Build from a completion outcome; `None` means the call failed
    pub fn from_outcome(voter: AgentId, text: Option<String>) -> Self {
        match text {
            Some(text) => Self::ok(voter, text),
            None => Self::failed(voter),
        }
    }

    /// The flattened "<voter> voted: <raw text>" line handed to the arbiter
    pub fn vote_line(&self) -> String {
        format!("{} voted: {}", self.voter, self.raw_vote)
    }
}

/// Everything one voting phase produces
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ballot {
    /// Position `k - 1` holds the agent whose answer was labelled "Answer #k"
    pub ordinal_map: Vec<AgentId>,
    /// One entry per voter, in voter order
    pub entries: Vec<BallotEntry>,
    /// `entries` flattened into arbiter-ready lines
    pub vote_lines: Vec<String>,
}

impl Ballot {
    pub fn new(ordinal_map: Vec<AgentId>, entries: Vec<BallotEntry>) -> Self {
        let vote_lines = entries.iter().map(BallotEntry::vote_line).collect();
        Self {
            ordinal_map,
            entries,
            vote_lines,
        }
    }

    /// Resolve a 1-based ordinal back to its agent
    pub fn agent_for_ordinal(&self, ordinal: usize) -> Option<&AgentId> {
        ordinal
            .checked_sub(1)
            .and_then(|index| self.ordinal_map.get(index))
    }

    /// 1-based ordinal of the given agent's answer
    pub fn ordinal_of(&self, agent: &AgentId) -> Option<usize> {
        self.ordinal_map
            .iter()
            .position(|id| id == agent)
            .map(|index| index + 1)
    }

    /// Number of voters whose call succeeded
    pub fn successful_votes(&self) -> usize {
        self.entries.iter().filter(|e| e.status.is_ok()).count()
    }
}
