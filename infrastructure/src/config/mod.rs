//! Configuration file loading for llm-council
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. Environment variables: `COUNCIL_<SECTION>__<KEY>`
//! 2. `--config <path>` specified file
//! 3. Project root: `./council.toml` or `./.council.toml`
//! 4. XDG config: `$XDG_CONFIG_HOME/llm-council/config.toml`
//! 5. Default values
//!
//! Command-line flags are applied on top by the binary.

mod file_config;
mod issue;
mod loader;

pub use file_config::{
    DEFAULT_API_KEY_ENV, DEFAULT_BASE_URL, FileConfig, FileCouncilConfig, FileLimitsConfig,
    FileOutputConfig, FileOutputFormat, FileProviderConfig, ProviderSettings,
};
pub use issue::{ConfigIssue, ConfigIssueCode, Severity};
pub use loader::{ConfigError, ConfigLoader};
