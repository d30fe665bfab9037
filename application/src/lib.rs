//! Application layer for llm-council
//!
//! This crate contains the deliberation use cases, port definitions, and
//! application parameters. It depends only on the domain layer.

pub mod config;
pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use config::CouncilParams;
pub use ports::{
    completion::{CompletionError, CompletionService},
    event_sink::{ChannelEventSink, CompositeEventSink, EventSink, NoEvents},
};
pub use use_cases::arbitrate::ArbiterJudge;
pub use use_cases::collect_answers::AnswerCollector;
pub use use_cases::collect_votes::VotingCoordinator;
pub use use_cases::run_council::{
    CouncilStream, RunCouncilError, RunCouncilInput, RunCouncilUseCase,
};
pub use use_cases::synthesize::EnsembleSynthesizer;
