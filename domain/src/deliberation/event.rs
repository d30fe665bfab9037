//! Lifecycle events emitted while a deliberation runs
//!
//! Events are immutable records emitted in strict order. Per round:
//!
//! ```text
//! RoundStarted → PhaseStarted(answering) → (AgentThinking | AgentAnswered)*
//!   [→ PhaseStarted(voting) → AgentVoted* → VotesCollected
//!    → PhaseStarted(arbiter) → ArbiterThinking → EliminationDecided]
//! ```
//!
//! and on termination `PhaseStarted(ensemble) → FinalAnswer → Finished`.
//!
//! Per-agent events are emitted while the phase runs: `AgentThinking` when
//! an agent's call is issued, `AgentAnswered`/`AgentVoted` as soon as that
//! agent and every agent before it in the active order have resolved.
//! When a phase is cancelled, `Aborted` follows whatever per-agent events it
//! already produced and none of its results are kept.
//! How events are serialized or transported is up to the consumer.

use super::answer::CallStatus;
use super::elimination::Resolution;
use super::phase::Phase;
use crate::core::agent::AgentId;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DeliberationEvent {
    Started {
        question: String,
        members: Vec<AgentId>,
        arbiter: AgentId,
    },
    RoundStarted {
        round: u32,
        active: Vec<AgentId>,
    },
    PhaseStarted {
        round: u32,
        phase: Phase,
    },
    /// An answering call was issued to this agent
    AgentThinking {
        round: u32,
        agent: AgentId,
    },
    AgentAnswered {
        round: u32,
        agent: AgentId,
        text: String,
        status: CallStatus,
    },
    AgentVoted {
        round: u32,
        agent: AgentId,
        vote: String,
        status: CallStatus,
    },
    VotesCollected {
        round: u32,
        votes: Vec<String>,
    },
    /// The arbiter call was issued
    ArbiterThinking {
        round: u32,
        arbiter: AgentId,
    },
    EliminationDecided {
        round: u32,
        eliminated: AgentId,
        reasoning: String,
        resolution: Resolution,
    },
    FinalAnswer {
        synthesizer: AgentId,
        text: Option<String>,
        status: CallStatus,
        survivors: Vec<AgentId>,
    },
    /// The deliberation was cancelled; the in-flight round was discarded
    Aborted {
        round: u32,
    },
    Finished,
}

impl DeliberationEvent {
    /// Event name as used in the `type` tag
    pub fn name(&self) -> &'static str {
        match self {
            DeliberationEvent::Started { .. } => "started",
            DeliberationEvent::RoundStarted { .. } => "round_started",
            DeliberationEvent::PhaseStarted { .. } => "phase_started",
            DeliberationEvent::AgentThinking { .. } => "agent_thinking",
            DeliberationEvent::AgentAnswered { .. } => "agent_answered",
            DeliberationEvent::AgentVoted { .. } => "agent_voted",
            DeliberationEvent::VotesCollected { .. } => "votes_collected",
            DeliberationEvent::ArbiterThinking { .. } => "arbiter_thinking",
            DeliberationEvent::EliminationDecided { .. } => "elimination_decided",
            DeliberationEvent::FinalAnswer { .. } => "final_answer",
            DeliberationEvent::Aborted { .. } => "aborted",
            DeliberationEvent::Finished => "finished",
        }
    }

    /// Whether no further events follow this one
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            DeliberationEvent::Finished | DeliberationEvent::Aborted { .. }
        )
    }
}
