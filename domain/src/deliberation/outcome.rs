//! Deliberation results - immutable records of what happened.
//!
//! - [`RoundRecord`] - answers, ballot and decision of one round
//! - [`FinalResult`] - the synthesized master answer (or its failure)
//! - [`CouncilOutcome`] - everything above for one question

use super::answer::{Answer, CallStatus};
use super::ballot::Ballot;
use super::elimination::EliminationDecision;
use super::state::ArchivedAnswer;
use crate::core::agent::{AgentId, CouncilRoster};
use serde::{Deserialize, Serialize};

/// Everything produced in one round
///
/// `ballot` and `decision` are absent in the two-survivor shortcut round.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundRecord {
    pub round: u32,
    pub answers: Vec<Answer>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ballot: Option<Ballot>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub decision: Option<EliminationDecision>,
}

impl RoundRecord {
    pub fn new(round: u32, answers: Vec<Answer>) -> Self {
        Self {
            round,
            answers,
            ballot: None,
            decision: None,
        }
    }

    pub fn with_ballot(mut self, ballot: Ballot) -> Self {
        self.ballot = Some(ballot);
        self
    }

    pub fn with_decision(mut self, decision: EliminationDecision) -> Self {
        self.decision = Some(decision);
        self
    }

    /// True for the round that skipped voting and went straight to synthesis
    pub fn is_shortcut(&self) -> bool {
        self.ballot.is_none() && self.decision.is_none()
    }

    pub fn answer_of(&self, agent: &AgentId) -> Option<&Answer> {
        self.answers.iter().find(|a| &a.agent == agent)
    }
}

/// The synthesized answer
///
/// A failed synthesis has `text: None`; no substitute text is ever filled in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FinalResult {
    pub synthesizer: AgentId,
    pub text: Option<String>,
}

impl FinalResult {
    pub fn success(synthesizer: AgentId, text: impl Into<String>) -> Self {
        Self {
            synthesizer,
            text: Some(text.into()),
        }
    }

    pub fn failure(synthesizer: AgentId) -> Self {
        Self {
            synthesizer,
            text: None,
        }
    }

    pub fn is_success(&self) -> bool {
        self.text.is_some()
    }

    pub fn status(&self) -> CallStatus {
        if self.is_success() {
            CallStatus::Ok
        } else {
            CallStatus::Failed
        }
    }
}

/// Complete result of one deliberation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CouncilOutcome {
    pub question: String,
    pub roster: CouncilRoster,
    pub rounds: Vec<RoundRecord>,
    /// Agents still active when synthesis started (one, or two via the shortcut)
    pub survivors: Vec<AgentId>,
    /// Eliminated agents in elimination order
    pub eliminated: Vec<ArchivedAnswer>,
    pub final_result: FinalResult,
}

impl CouncilOutcome {
    /// Decisions in round order
    pub fn decisions(&self) -> impl Iterator<Item = &EliminationDecision> {
        self.rounds.iter().filter_map(|r| r.decision.as_ref())
    }

    /// Number of rounds that fell back to eliminating the last agent
    pub fn fallback_count(&self) -> usize {
        self.decisions().filter(|d| d.is_fallback()).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failed_final_result_has_no_text() {
        let result = FinalResult::failure(AgentId::from("judge"));
        assert!(!result.is_success());
        assert_eq!(result.status(), CallStatus::Failed);
        assert!(result.text.is_none());
    }

    #[test]
    fn test_shortcut_round() {
        let record = RoundRecord::new(4, vec![Answer::ok(AgentId::from("a"), 4, "x")]);
        assert!(record.is_shortcut());
        assert_eq!(record.answer_of(&AgentId::from("a")).unwrap().text, "x");

        let record = record.with_decision(EliminationDecision::fallback(4, AgentId::from("a")));
        assert!(!record.is_shortcut());
    }
}
