//! Output formatter trait

use council_domain::CouncilOutcome;

/// Trait for formatting council outcomes
pub trait OutputFormatter {
    /// Format the complete deliberation, round by round
    fn format(&self, outcome: &CouncilOutcome) -> String;

    /// Format as JSON
    fn format_json(&self, outcome: &CouncilOutcome) -> String;

    /// Format the final answer only (concise output)
    fn format_final_only(&self, outcome: &CouncilOutcome) -> String;
}
