//! Console output formatter for council outcomes

use crate::output::formatter::OutputFormatter;
use colored::Colorize;
use council_domain::{AgentRole, CallStatus, CouncilOutcome, RoundRecord};

/// Shown in place of the master answer when synthesis failed
pub const SYNTHESIS_FAILED: &str = "Failed to synthesize final answer";

/// Formats council outcomes for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Format the complete deliberation
    pub fn format(outcome: &CouncilOutcome) -> String {
        let mut output = String::new();

        output.push_str(&Self::header("LLM Council Results"));
        output.push('\n');

        output.push_str(&format!(
            "{} {}\n\n",
            "Question:".cyan().bold(),
            outcome.question
        ));

        let members: Vec<&str> = outcome.roster.members.iter().map(|m| m.as_str()).collect();
        output.push_str(&format!(
            "{} {}\n",
            "Members:".cyan().bold(),
            members.join(", ")
        ));
        let arbiter = &outcome.roster.arbiter;
        let also_member = if outcome.roster.roles_of(arbiter).contains(&AgentRole::Member) {
            " (also a member)"
        } else {
            ""
        };
        output.push_str(&format!(
            "{} {}{}\n",
            "Arbiter:".cyan().bold(),
            arbiter,
            also_member
        ));

        for record in &outcome.rounds {
            output.push_str(&Self::round(record));
        }

        if !outcome.eliminated.is_empty() {
            output.push_str(&Self::section_header("Elimination Order"));
            for (index, archived) in outcome.eliminated.iter().enumerate() {
                output.push_str(&format!(
                    "  {}. {} (round {})\n",
                    index + 1,
                    archived.agent,
                    archived.round
                ));
            }
        }

        output.push_str(&Self::section_header("Final Answer"));
        let survivors: Vec<&str> = outcome.survivors.iter().map(|s| s.as_str()).collect();
        output.push_str(&format!(
            "\n{}\n{}\n\n{}\n",
            format!("Synthesizer: {}", outcome.final_result.synthesizer)
                .yellow()
                .bold(),
            format!("Survivors: {}", survivors.join(", ")).dimmed(),
            Self::final_text(outcome)
        ));

        output.push_str(&Self::footer());

        output
    }

    fn round(record: &RoundRecord) -> String {
        let mut output = Self::section_header(&format!("Round {}", record.round));

        for answer in &record.answers {
            let title = format!("── {} ──", answer.agent);
            let title = match answer.status {
                CallStatus::Ok => title.yellow().bold(),
                CallStatus::Failed => title.red().bold(),
            };
            output.push_str(&format!("\n{}\n{}\n", title, answer.text));
        }

        if let Some(ballot) = &record.ballot {
            output.push_str(&format!("\n{}\n", "Votes:".cyan().bold()));
            for line in &ballot.vote_lines {
                output.push_str(&format!("{}\n", Self::indent(line, "  ")));
            }
        }

        if let Some(decision) = &record.decision {
            let fallback = if decision.is_fallback() {
                " (fallback)".dimmed().to_string()
            } else {
                String::new()
            };
            output.push_str(&format!(
                "\n{} {}{}\n{}\n",
                "Eliminated:".red().bold(),
                decision.eliminated,
                fallback,
                Self::indent(&decision.reasoning, "  ")
            ));
        }

        if record.is_shortcut() {
            output.push_str(&format!(
                "\n{}\n",
                "Two agents remain; going straight to synthesis.".dimmed()
            ));
        }

        output
    }

    /// Format as JSON
    pub fn format_json(outcome: &CouncilOutcome) -> String {
        serde_json::to_string_pretty(outcome).unwrap_or_else(|_| "{}".to_string())
    }

    /// Format the final answer only (concise output)
    pub fn format_final_only(outcome: &CouncilOutcome) -> String {
        let mut output = String::new();

        output.push_str(&format!(
            "{}\n\n",
            "=== LLM Council Answer ===".cyan().bold()
        ));

        output.push_str(&format!("{} {}\n\n", "Q:".bold(), outcome.question));

        let survivors: Vec<&str> = outcome.survivors.iter().map(|s| s.as_str()).collect();
        output.push_str(&format!(
            "{} {}\n\n",
            "Survivors:".dimmed(),
            survivors.join(", ")
        ));

        output.push_str(&Self::final_text(outcome));
        output.push('\n');

        output
    }

    fn final_text(outcome: &CouncilOutcome) -> String {
        match &outcome.final_result.text {
            Some(text) => text.clone(),
            None => SYNTHESIS_FAILED.red().to_string(),
        }
    }

    fn header(title: &str) -> String {
        let line = "=".repeat(60);
        format!("{}\n{:^60}\n{}", line.cyan(), title.bold(), line.cyan())
    }

    fn section_header(title: &str) -> String {
        format!("\n{}\n{}\n", title.cyan().bold(), "-".repeat(40))
    }

    fn footer() -> String {
        format!("\n{}\n", "=".repeat(60).cyan())
    }

    /// Indent a multi-line string
    pub fn indent(text: &str, prefix: &str) -> String {
        text.lines()
            .map(|line| format!("{}{}", prefix, line))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl OutputFormatter for ConsoleFormatter {
    fn format(&self, outcome: &CouncilOutcome) -> String {
        Self::format(outcome)
    }

    fn format_json(&self, outcome: &CouncilOutcome) -> String {
        Self::format_json(outcome)
    }

    fn format_final_only(&self, outcome: &CouncilOutcome) -> String {
        Self::format_final_only(outcome)
    }
}
