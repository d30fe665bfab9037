//! Core domain concepts shared across all subdomains.
//!
//! - [`agent::AgentId`] / [`agent::CouncilRoster`]: who takes part in a deliberation
//! - [`question::Question`]: a validated question to pose to the council
//! - [`error::DomainError`]: domain-level errors

pub mod agent;
pub mod error;
pub mod question;
pub mod string;
