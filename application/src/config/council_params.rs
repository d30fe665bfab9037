//! Council parameters: per-call limits and phase execution control.
//!
//! [`CouncilParams`] groups the static parameters the deliberation use case
//! applies to every completion call. These are application-layer concerns,
//! not domain policy.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Completion limits and phase execution control.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CouncilParams {
    /// Output-token limit for each answering call.
    pub answer_max_tokens: u32,
    /// Output-token limit for each voting call.
    pub vote_max_tokens: u32,
    /// Output-token limit for the arbiter call.
    pub arbiter_max_tokens: u32,
    /// Output-token limit for the synthesis call.
    pub synthesis_max_tokens: u32,
    /// Upper bound for a single completion call; elapsing counts as a failure.
    pub call_timeout: Option<Duration>,
    /// Issue the per-agent calls of a phase concurrently.
    pub parallel: bool,
}

impl Default for CouncilParams {
    fn default() -> Self {
        Self {
            answer_max_tokens: 200,
            vote_max_tokens: 100,
            arbiter_max_tokens: 150,
            synthesis_max_tokens: 500,
            call_timeout: None,
            parallel: true,
        }
    }
}

impl CouncilParams {
    // ==================== Builder Methods ====================

    pub fn with_answer_max_tokens(mut self, max: u32) -> Self {
        self.answer_max_tokens = max;
        self
    }

    pub fn with_vote_max_tokens(mut self, max: u32) -> Self {
        self.vote_max_tokens = max;
        self
    }

    pub fn with_arbiter_max_tokens(mut self, max: u32) -> Self {
        self.arbiter_max_tokens = max;
        self
    }

    pub fn with_synthesis_max_tokens(mut self, max: u32) -> Self {
        self.synthesis_max_tokens = max;
        self
    }

    pub fn with_call_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.call_timeout = timeout;
        self
    }

    /// Create params whose call timeout is given in seconds (`None` = no timeout).
    pub fn with_timeout_seconds(self, seconds: Option<u64>) -> Self {
        self.with_call_timeout(seconds.map(Duration::from_secs))
    }

    pub fn sequential(mut self) -> Self {
        self.parallel = false;
        self
    }
}
