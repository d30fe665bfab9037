//! Per-call output limits from TOML (`[limits]` section)

use super::super::issue::{ConfigIssue, ConfigIssueCode};
use serde::{Deserialize, Serialize};

/// Output-token limit for each kind of completion call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileLimitsConfig {
    pub answer_max_tokens: u32,
    pub vote_max_tokens: u32,
    pub arbiter_max_tokens: u32,
    pub synthesis_max_tokens: u32,
}

impl Default for FileLimitsConfig {
    fn default() -> Self {
        Self {
            answer_max_tokens: 200,
            vote_max_tokens: 100,
            arbiter_max_tokens: 150,
            synthesis_max_tokens: 500,
        }
    }
}

impl FileLimitsConfig {
    pub(crate) fn validate(&self) -> Vec<ConfigIssue> {
        [
            ("answer_max_tokens", self.answer_max_tokens),
            ("vote_max_tokens", self.vote_max_tokens),
            ("arbiter_max_tokens", self.arbiter_max_tokens),
            ("synthesis_max_tokens", self.synthesis_max_tokens),
        ]
        .into_iter()
        .filter(|(_, value)| *value == 0)
        .map(|(field, value)| {
            ConfigIssue::error(
                ConfigIssueCode::InvalidValue {
                    field: format!("limits.{field}"),
                    value: value.to_string(),
                },
                format!("limits.{field}: must be greater than 0"),
            )
        })
        .collect()
    }
}
