//! Domain layer for llm-council
//!
//! This crate contains the core deliberation logic, entities, and value objects.
//! It has no dependencies on infrastructure or presentation concerns.
//!
//! # Core Concepts
//!
//! ## Council
//!
//! A fixed roster of member agents answers a question. An arbiter agent
//! reads their anonymized peer votes and eliminates one member per round.
//!
//! ## Deliberation
//!
//! - **Round**: answering, then (with 3+ agents) voting and elimination
//! - **Shortcut**: with exactly two agents left, both go straight to synthesis
//! - **Archive**: eliminated agents' last answers, kept for the final synthesis

pub mod config;
pub mod core;
pub mod deliberation;
pub mod prompt;
pub mod session;

// Re-export commonly used types
pub use config::OutputFormat;
pub use core::{
    agent::{AgentId, AgentRole, CouncilRoster},
    error::DomainError,
    question::Question,
    string::{preview, truncate},
};
pub use deliberation::{
    ARBITER_CALL_FAILED, Answer, ArchivedAnswer, Ballot, BallotEntry, CallStatus, CouncilOutcome,
    DeliberationEvent, DeliberationState, ELIMINATE_MARKER, EliminationDecision,
    EliminationParser, EnumerationOrderParser, FAILED_ANSWER, FAILED_VOTE, FinalResult,
    MarkerLineParser, ParserKind, Phase, Resolution, RoundRecord,
};
pub use prompt::PromptTemplate;
pub use session::entities::{Message, Role};
