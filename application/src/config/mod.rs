//! Application-level configuration.
//!
//! - [`CouncilParams`]: per-call token limits, timeout and phase concurrency

pub mod council_params;

pub use council_params::CouncilParams;
