//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly and use domain types where appropriate.

mod council;
mod limits;
mod output;
mod provider;

pub use council::FileCouncilConfig;
pub use limits::FileLimitsConfig;
pub use output::{FileOutputConfig, FileOutputFormat};
pub use provider::{DEFAULT_API_KEY_ENV, DEFAULT_BASE_URL, FileProviderConfig, ProviderSettings};

use super::issue::ConfigIssue;
use council_application::CouncilParams;
use serde::{Deserialize, Serialize};

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Roster and deliberation settings
    pub council: FileCouncilConfig,
    /// Per-call output-token limits
    pub limits: FileLimitsConfig,
    /// Completion endpoint and credentials
    pub provider: FileProviderConfig,
    /// Output settings
    pub output: FileOutputConfig,
}

impl FileConfig {
    /// Validate the entire configuration, returning all detected issues.
    ///
    /// Credentials are not checked here; see [`FileProviderConfig::resolve`].
    pub fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = self.council.validate();
        issues.extend(self.limits.validate());
        issues.extend(self.provider.validate());
        issues
    }

    /// Deliberation parameters derived from `[limits]`, `[provider]` and `[council]`
    pub fn to_params(&self) -> CouncilParams {
        let params = CouncilParams::default()
            .with_answer_max_tokens(self.limits.answer_max_tokens)
            .with_vote_max_tokens(self.limits.vote_max_tokens)
            .with_arbiter_max_tokens(self.limits.arbiter_max_tokens)
            .with_synthesis_max_tokens(self.limits.synthesis_max_tokens)
            .with_timeout_seconds(Some(self.provider.timeout_seconds));
        if self.council.parallel {
            params
        } else {
            params.sequential()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use council_domain::{OutputFormat, ParserKind};
    use std::time::Duration;

    #[test]
    fn test_deserialize_full_config() {
        let toml_str = r#"
[council]
members = ["model-a", "model-b", "model-c"]
arbiter = "model-x"
elimination_parser = "marker_line"
parallel = false

[limits]
answer_max_tokens = 256

[provider]
base_url = "http://localhost:8080/v1/chat/completions"
timeout_seconds = 10

[output]
format = "full"
color = false
"#;

        let config: FileConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.council.members.len(), 3);
        assert_eq!(config.council.arbiter.as_deref(), Some("model-x"));
        assert_eq!(config.council.elimination_parser, ParserKind::MarkerLine);
        assert_eq!(config.limits.answer_max_tokens, 256);
        assert_eq!(config.limits.vote_max_tokens, 100);
        assert_eq!(config.provider.api_key_env, "HF_TOKEN");
        assert_eq!(config.output.format, Some(OutputFormat::Full));
        assert!(!config.output.color);
        assert!(config.validate().is_empty());

        let params = config.to_params();
        assert_eq!(params.answer_max_tokens, 256);
        assert_eq!(params.call_timeout, Some(Duration::from_secs(10)));
        assert!(!params.parallel);
    }

    #[test]
    fn test_default_config() {
        let config = FileConfig::default();
        assert!(config.council.members.is_empty());
        assert!(config.council.parallel);
        assert_eq!(config.provider.base_url, DEFAULT_BASE_URL);
        assert!(config.output.color);

        let params = config.to_params();
        assert_eq!(params.synthesis_max_tokens, 500);
        assert_eq!(params.call_timeout, Some(Duration::from_secs(30)));
    }

    #[test]
    fn test_validate_default_config_needs_roster() {
        let issues = FileConfig::default().validate();
        assert_eq!(issues.iter().filter(|i| i.is_error()).count(), 2);
    }

    #[test]
    fn test_unknown_parser_is_rejected() {
        let toml_str = r#"
[council]
elimination_parser = "vibes"
"#;
        assert!(toml::from_str::<FileConfig>(toml_str).is_err());
    }
}
