//! Deliberation domain
//!
//! A deliberation is a multi-round elimination tournament: every round the
//! active agents answer, vote anonymously for the worst answer, and an
//! arbiter eliminates one of them. When one agent is left (or two, via the
//! shortcut) the surviving and eliminated perspectives are synthesized into
//! a single answer.
//!
//! ```text
//! ┌──────────┐   ┌────────┐   ┌─────────────┐
//! │ Answering│──►│ Voting │──►│ Arbitrating │──┐
//! └──────────┘   └────────┘   └─────────────┘  │
//!      ▲  │ (2 active)                          │ (2+ left)
//!      │  └───────────────► Ensemble ◄──────────┤ (1 left)
//!      └────────────────────────────────────────┘
//! ```

pub mod answer;
pub mod ballot;
pub mod elimination;
pub mod event;
pub mod outcome;
pub mod parsing;
pub mod phase;
pub mod state;

pub use answer::{Answer, CallStatus, FAILED_ANSWER};
pub use ballot::{Ballot, BallotEntry, FAILED_VOTE};
pub use elimination::{ARBITER_CALL_FAILED, EliminationDecision, Resolution};
pub use event::DeliberationEvent;
pub use outcome::{CouncilOutcome, FinalResult, RoundRecord};
pub use parsing::{
    ELIMINATE_MARKER, EliminationParser, EnumerationOrderParser, MarkerLineParser, ParserKind,
};
pub use phase::Phase;
pub use state::{ArchivedAnswer, DeliberationState};
