//! Output format value object

use serde::{Deserialize, Serialize};

/// How a finished deliberation is rendered
///
/// Shared by the configuration file and the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Only the final synthesized answer (default)
    #[default]
    Final,
    /// Every round: answers, votes, eliminations, then the final answer
    Full,
    /// The complete outcome as pretty-printed JSON
    Json,
    /// One JSON object per event while the deliberation runs
    Events,
}

impl OutputFormat {
    pub fn as_str(&self) -> &str {
        match self {
            OutputFormat::Final => "final",
            OutputFormat::Full => "full",
            OutputFormat::Json => "json",
            OutputFormat::Events => "events",
        }
    }

    /// Whether the output is machine-readable (no decorations, no spinners)
    pub fn is_machine_readable(&self) -> bool {
        matches!(self, OutputFormat::Json | OutputFormat::Events)
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
