//! Completion provider configuration from TOML (`[provider]` section)

use super::super::issue::{ConfigIssue, ConfigIssueCode};
use serde::{Deserialize, Serialize};
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://api-inference.huggingface.co/v1/chat/completions";
pub const DEFAULT_API_KEY_ENV: &str = "HF_TOKEN";

/// OpenAI-compatible chat-completions endpoint settings
///
/// # Example
///
/// ```toml
/// [provider]
/// base_url = "https://api-inference.huggingface.co/v1/chat/completions"
/// api_key_env = "HF_TOKEN"
/// timeout_seconds = 30
/// temperature = 0.7
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileProviderConfig {
    /// Full URL of the chat-completions endpoint
    pub base_url: String,
    /// Environment variable name for the API key (default: "HF_TOKEN").
    pub api_key_env: String,
    /// Direct API key (not recommended; use env var instead).
    pub api_key: Option<String>,
    /// Per-request timeout
    pub timeout_seconds: u64,
    /// Sampling temperature sent with every request
    pub temperature: f32,
}

impl Default for FileProviderConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key_env: DEFAULT_API_KEY_ENV.to_string(),
            api_key: None,
            timeout_seconds: 30,
            temperature: 0.7,
        }
    }
}

/// Resolved settings handed to the HTTP completion adapter
#[derive(Clone, PartialEq)]
pub struct ProviderSettings {
    pub base_url: String,
    pub api_key: String,
    pub timeout: Duration,
    pub temperature: f32,
}

impl std::fmt::Debug for ProviderSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderSettings")
            .field("base_url", &self.base_url)
            .field("api_key", &"<redacted>")
            .field("timeout", &self.timeout)
            .field("temperature", &self.temperature)
            .finish()
    }
}

impl FileProviderConfig {
    /// Resolve the credential and build [`ProviderSettings`]
    ///
    /// `lookup` reads an environment variable; an explicit `api_key` wins
    /// over the variable named by `api_key_env`.
    pub fn resolve_with<F>(&self, lookup: F) -> Result<ProviderSettings, ConfigIssue>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_key = self
            .api_key
            .clone()
            .filter(|k| !k.trim().is_empty())
            .or_else(|| lookup(&self.api_key_env).filter(|k| !k.trim().is_empty()))
            .ok_or_else(|| {
                ConfigIssue::error(
                    ConfigIssueCode::MissingCredential {
                        env: self.api_key_env.clone(),
                    },
                    format!(
                        "provider: no API key found; set the {} environment variable",
                        self.api_key_env
                    ),
                )
            })?;

        Ok(ProviderSettings {
            base_url: self.base_url.clone(),
            api_key,
            timeout: Duration::from_secs(self.timeout_seconds),
            temperature: self.temperature,
        })
    }

    /// Resolve against the process environment
    pub fn resolve(&self) -> Result<ProviderSettings, ConfigIssue> {
        self.resolve_with(|name| std::env::var(name).ok())
    }

    pub(crate) fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();

        if self.timeout_seconds == 0 {
            issues.push(ConfigIssue::error(
                ConfigIssueCode::InvalidValue {
                    field: "provider.timeout_seconds".to_string(),
                    value: "0".to_string(),
                },
                "provider.timeout_seconds: cannot be 0",
            ));
        }

        if !(0.0..=2.0).contains(&self.temperature) {
            issues.push(ConfigIssue::warning(
                ConfigIssueCode::InvalidValue {
                    field: "provider.temperature".to_string(),
                    value: self.temperature.to_string(),
                },
                format!(
                    "provider.temperature: {} is outside the usual 0.0-2.0 range",
                    self.temperature
                ),
            ));
        }

        if self.api_key.is_some() {
            issues.push(ConfigIssue::warning(
                ConfigIssueCode::PlaintextApiKey,
                format!(
                    "provider.api_key: prefer the {} environment variable over a plain-text key",
                    self.api_key_env
                ),
            ));
        }

        issues
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_reads_named_env_var() {
        let config = FileProviderConfig::default();
        let settings = config
            .resolve_with(|name| (name == "HF_TOKEN").then(|| "hf_secret".to_string()))
            .unwrap();

        assert_eq!(settings.api_key, "hf_secret");
        assert_eq!(settings.base_url, DEFAULT_BASE_URL);
        assert_eq!(settings.timeout, Duration::from_secs(30));
        assert!(!format!("{settings:?}").contains("hf_secret"));
    }

    #[test]
    fn test_explicit_key_wins() {
        let config = FileProviderConfig {
            api_key: Some("inline".to_string()),
            ..Default::default()
        };
        let settings = config.resolve_with(|_| Some("from-env".to_string())).unwrap();
        assert_eq!(settings.api_key, "inline");
        assert!(
            config
                .validate()
                .iter()
                .any(|i| i.code == ConfigIssueCode::PlaintextApiKey)
        );
    }

    #[test]
    fn test_missing_credential() {
        let config = FileProviderConfig {
            api_key_env: "COUNCIL_TEST_TOKEN".to_string(),
            ..Default::default()
        };
        let issue = config.resolve_with(|_| None).unwrap_err();
        assert!(issue.is_error());
        assert_eq!(
            issue.code,
            ConfigIssueCode::MissingCredential {
                env: "COUNCIL_TEST_TOKEN".to_string()
            }
        );
    }

    #[test]
    fn test_zero_timeout_is_an_error() {
        let config = FileProviderConfig {
            timeout_seconds: 0,
            ..Default::default()
        };
        assert!(config.validate().iter().any(|i| i.is_error()));
    }
}
