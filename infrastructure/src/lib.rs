//! Infrastructure layer for llm-council
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer, including configuration file loading.

pub mod config;
pub mod logging;
pub mod providers;

// Re-export commonly used types
pub use config::{
    ConfigError, ConfigIssue, ConfigIssueCode, ConfigLoader, FileConfig, FileCouncilConfig,
    FileLimitsConfig, FileOutputConfig, FileOutputFormat, FileProviderConfig, ProviderSettings,
    Severity,
};
pub use logging::JsonlTranscriptLogger;
pub use providers::HttpCompletionService;
