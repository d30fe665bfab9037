//! Deliberation state and its transition rules
//!
//! [`DeliberationState`] is owned by the round controller for the duration of
//! one question. Its fields are private: the only ways to change it are
//! [`DeliberationState::record_answers`] and
//! [`DeliberationState::apply_elimination`], which keep the invariants below.
//!
//! - `active` has no duplicates and shrinks by exactly one per elimination
//! - an eliminated agent never re-enters `active`
//! - archive keys and `active` are disjoint; the archive is append-only
//! - `round` starts at 1 and only increases on an elimination

use super::answer::Answer;
use super::elimination::EliminationDecision;
use super::phase::Phase;
use crate::core::agent::{AgentId, CouncilRoster};
use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// An eliminated agent's answer, frozen at the moment of elimination
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArchivedAnswer {
    pub agent: AgentId,
    /// Round in which the agent was eliminated
    pub round: u32,
    pub text: String,
}

/// Mutable state of one deliberation
#[derive(Debug, Clone)]
pub struct DeliberationState {
    round: u32,
    active: Vec<AgentId>,
    last_answers: HashMap<AgentId, String>,
    archive: Vec<ArchivedAnswer>,
}

impl DeliberationState {
    /// Start a deliberation with the full roster active
    pub fn new(roster: &CouncilRoster) -> Result<Self, DomainError> {
        roster.validate()?;
        Ok(Self {
            round: 1,
            active: roster.members.clone(),
            last_answers: HashMap::new(),
            archive: Vec::new(),
        })
    }

    // ==================== Accessors ====================

    pub fn round(&self) -> u32 {
        self.round
    }

    /// Active agents in roster order
    pub fn active(&self) -> &[AgentId] {
        &self.active
    }

    pub fn is_active(&self, agent: &AgentId) -> bool {
        self.active.contains(agent)
    }

    /// Most recent answer text produced by the agent
    pub fn last_answer(&self, agent: &AgentId) -> Option<&str> {
        self.last_answers.get(agent).map(String::as_str)
    }

    /// Eliminated agents in elimination order
    pub fn archive(&self) -> &[ArchivedAnswer] {
        &self.archive
    }

    pub fn archived(&self, agent: &AgentId) -> Option<&ArchivedAnswer> {
        self.archive.iter().find(|a| &a.agent == agent)
    }

    /// Latest answers of the surviving agents, in roster order
    ///
    /// An agent that never answered (a one-member roster) maps to an empty string.
    pub fn survivor_answers(&self) -> Vec<(AgentId, String)> {
        self.active
            .iter()
            .map(|id| {
                let text = self.last_answers.get(id).cloned().unwrap_or_default();
                (id.clone(), text)
            })
            .collect()
    }

    /// Who performs the final synthesis
    ///
    /// A sole survivor synthesizes its own win; otherwise the roster's
    /// configured synthesizer (the arbiter unless overridden) does.
    pub fn synthesizer(&self, roster: &CouncilRoster) -> AgentId {
        match self.active.as_slice() {
            [survivor] => survivor.clone(),
            _ => roster.default_synthesizer().clone(),
        }
    }

    // ==================== Transitions ====================

    /// Phase the deliberation starts in
    pub fn initial_phase(&self) -> Phase {
        if self.active.len() > 1 {
            Phase::Answering
        } else {
            Phase::Ensemble
        }
    }

    /// Phase that follows `completed`, given the current state
    ///
    /// Must be called after the completed phase's mutation has been committed.
    pub fn next_phase(&self, completed: Phase) -> Phase {
        match completed {
            Phase::Answering if self.active.len() == 2 => Phase::Ensemble,
            Phase::Answering if self.active.len() > 2 => Phase::Voting,
            Phase::Answering => Phase::Ensemble,
            Phase::Voting => Phase::Arbitrating,
            Phase::Arbitrating if self.active.len() > 1 => Phase::Answering,
            Phase::Arbitrating => Phase::Ensemble,
            Phase::Ensemble | Phase::Done => Phase::Done,
        }
    }

    // ==================== Mutations ====================

    /// Remember this round's answers as each agent's latest text
    ///
    /// Answers from agents that are no longer active are ignored.
    pub fn record_answers(&mut self, answers: &[Answer]) {
        for answer in answers {
            if self.is_active(&answer.agent) {
                self.last_answers
                    .insert(answer.agent.clone(), answer.text.clone());
            }
        }
    }

    /// Commit an elimination
    ///
    /// Archives the agent's current answer, removes it from the active set
    /// and advances the round. Returns `false` (and changes nothing) when the
    /// agent is not active.
    pub fn apply_elimination(&mut self, decision: &EliminationDecision) -> bool {
        let Some(index) = self.active.iter().position(|id| id == &decision.eliminated) else {
            return false;
        };

        let agent = self.active.remove(index);
        let text = self.last_answers.remove(&agent).unwrap_or_default();
        self.archive.push(ArchivedAnswer {
            agent,
            round: self.round,
            text,
        });
        self.round += 1;
        true
    }
}
