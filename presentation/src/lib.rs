//! Presentation layer for llm-council
//!
//! This crate contains CLI definitions, output formatters
//! and live progress reporters.

pub mod cli;
pub mod output;
pub mod progress;

// Re-export commonly used types
pub use cli::commands::{Cli, EliminationParserArg, OutputFormat};
pub use output::console::ConsoleFormatter;
pub use output::events::JsonEventPrinter;
pub use output::formatter::OutputFormatter;
pub use progress::reporter::{ProgressReporter, SimpleProgress};
