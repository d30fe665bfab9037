//! Use cases
//!
//! The four phase components and the round controller that drives them.

pub mod arbitrate;
pub mod collect_answers;
pub mod collect_votes;
pub mod run_council;
pub(crate) mod shared;
pub mod synthesize;
