//! Progress reporting for council deliberations

use colored::Colorize;
use council_application::EventSink;
use council_domain::{AgentId, CallStatus, DeliberationEvent, Phase, Resolution, preview};
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use std::sync::Mutex;
use std::time::Duration;

/// Reports progress during a deliberation with progress bars and spinners
///
/// Answering and voting get a bar sized to the active roster; the arbiter and
/// the final synthesis get a spinner.
pub struct ProgressReporter {
    multi: MultiProgress,
    active: Mutex<usize>,
    phase_bar: Mutex<Option<(Phase, ProgressBar)>>,
}

impl ProgressReporter {
    pub fn new() -> Self {
        Self {
            multi: MultiProgress::new(),
            active: Mutex::new(0),
            phase_bar: Mutex::new(None),
        }
    }

    fn phase_style() -> ProgressStyle {
        ProgressStyle::default_bar()
            .template("{spinner:.green} {prefix:.bold.cyan} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("=>-")
    }

    fn spinner_style() -> ProgressStyle {
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {prefix:.bold.cyan} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
    }

    fn status_mark(agent: &AgentId, status: CallStatus) -> String {
        match status {
            CallStatus::Ok => format!("{} {}", "v".green(), agent.short_name()),
            CallStatus::Failed => format!("{} {}", "x".red(), agent.short_name()),
        }
    }

    fn start_phase(&self, round: u32, phase: Phase) {
        self.finish_current(None);

        let title = format!("Round {}: {}", round, phase.display_name(round));
        let pb = match phase {
            Phase::Answering | Phase::Voting => {
                let total = self.active.lock().map(|n| *n).unwrap_or(0);
                let pb = self.multi.add(ProgressBar::new(total as u64));
                pb.set_style(Self::phase_style());
                pb
            }
            _ => {
                let pb = self.multi.add(ProgressBar::new_spinner());
                pb.set_style(Self::spinner_style());
                pb.enable_steady_tick(Duration::from_millis(120));
                pb
            }
        };
        pb.set_prefix(title);
        pb.set_message("Starting...");

        if let Ok(mut slot) = self.phase_bar.lock() {
            *slot = Some((phase, pb));
        }
    }

    fn tick(&self, agent: &AgentId, status: CallStatus) {
        if let Ok(slot) = self.phase_bar.lock()
            && let Some((_, pb)) = slot.as_ref()
        {
            pb.set_message(Self::status_mark(agent, status));
            pb.inc(1);
        }
    }

    fn set_message(&self, message: String) {
        if let Ok(slot) = self.phase_bar.lock()
            && let Some((_, pb)) = slot.as_ref()
        {
            pb.set_message(message);
        }
    }

    fn finish_current(&self, message: Option<String>) {
        let Ok(mut slot) = self.phase_bar.lock() else {
            return;
        };
        if let Some((phase, pb)) = slot.take() {
            let message = message.unwrap_or_else(|| format!("{} complete!", phase).green().to_string());
            pb.finish_with_message(message);
        }
    }
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl EventSink for ProgressReporter {
    fn emit(&self, event: &DeliberationEvent) {
        match event {
            DeliberationEvent::RoundStarted { active, .. } => {
                if let Ok(mut n) = self.active.lock() {
                    *n = active.len();
                }
            }
            DeliberationEvent::PhaseStarted { round, phase } => self.start_phase(*round, *phase),
            DeliberationEvent::AgentThinking { agent, .. } => {
                self.set_message(format!("{} thinking...", agent.short_name()));
            }
            DeliberationEvent::ArbiterThinking { arbiter, .. } => {
                self.set_message(format!("{} deciding...", arbiter.short_name()));
            }
            DeliberationEvent::AgentAnswered { agent, status, .. }
            | DeliberationEvent::AgentVoted { agent, status, .. } => self.tick(agent, *status),
            DeliberationEvent::VotesCollected { votes, .. } => {
                self.finish_current(Some(format!("{} votes collected", votes.len())));
            }
            DeliberationEvent::EliminationDecided {
                eliminated,
                resolution,
                ..
            } => {
                let message = match resolution {
                    Resolution::Parsed => format!("eliminated {}", eliminated.short_name().red()),
                    Resolution::Fallback => format!(
                        "eliminated {} {}",
                        eliminated.short_name().red(),
                        "(fallback)".dimmed()
                    ),
                };
                self.finish_current(Some(message));
            }
            DeliberationEvent::FinalAnswer {
                synthesizer,
                status,
                ..
            } => {
                self.finish_current(Some(Self::status_mark(synthesizer, *status)));
            }
            DeliberationEvent::Aborted { .. } => {
                if let Ok(mut slot) = self.phase_bar.lock()
                    && let Some((_, pb)) = slot.take()
                {
                    pb.abandon_with_message("cancelled".yellow().to_string());
                }
            }
            DeliberationEvent::Started { .. } | DeliberationEvent::Finished => {}
        }
    }
}

/// Simple text-based progress (no fancy UI)
///
/// Writes to stderr so stdout only ever carries the result.
pub struct SimpleProgress;

impl SimpleProgress {
    /// Render one event as a progress line, if it warrants one
    pub fn line(event: &DeliberationEvent) -> Option<String> {
        let line = match event {
            DeliberationEvent::Started { members, arbiter, .. } => format!(
                "{} {} members, arbiter {}",
                "Council:".cyan().bold(),
                members.len(),
                arbiter
            ),
            DeliberationEvent::RoundStarted { round, active } => format!(
                "\n{} {} ({} active)",
                "==".cyan(),
                format!("Round {}", round).bold(),
                active.len()
            ),
            DeliberationEvent::PhaseStarted { round, phase } => {
                format!("{} {}", "->".cyan(), phase.display_name(*round).bold())
            }
            DeliberationEvent::AgentAnswered { agent, text, status, .. } => match status {
                CallStatus::Ok => format!("  {} {}: {}", "v".green(), agent, preview(text, 60).dimmed()),
                CallStatus::Failed => format!("  {} {} (failed)", "x".red(), agent),
            },
            DeliberationEvent::AgentThinking { .. } => return None,
            DeliberationEvent::ArbiterThinking { arbiter, .. } => {
                format!("  {} {} deciding", "..".dimmed(), arbiter)
            }
            DeliberationEvent::AgentVoted { agent, status, .. } => match status {
                CallStatus::Ok => format!("  {} {}", "v".green(), agent),
                CallStatus::Failed => format!("  {} {} (failed)", "x".red(), agent),
            },
            DeliberationEvent::VotesCollected { .. } => return None,
            DeliberationEvent::EliminationDecided {
                eliminated,
                resolution,
                ..
            } => {
                let suffix = if *resolution == Resolution::Fallback {
                    " (fallback)"
                } else {
                    ""
                };
                format!("  {} eliminated {}{}", "x".red(), eliminated.to_string().bold(), suffix)
            }
            DeliberationEvent::FinalAnswer {
                synthesizer,
                status,
                ..
            } => match status {
                CallStatus::Ok => format!("  {} {} synthesized the answer", "v".green(), synthesizer),
                CallStatus::Failed => format!("  {} {} failed to synthesize", "x".red(), synthesizer),
            },
            DeliberationEvent::Aborted { round } => {
                format!("{} cancelled during round {}", "!".yellow(), round)
            }
            DeliberationEvent::Finished => return None,
        };
        Some(line)
    }
}

impl EventSink for SimpleProgress {
    fn emit(&self, event: &DeliberationEvent) {
        if let Some(line) = Self::line(event) {
            eprintln!("{}", line);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plain(event: &DeliberationEvent) -> Option<String> {
        colored::control::set_override(false);
        SimpleProgress::line(event)
    }

    #[test]
    fn test_second_round_answering_is_re_evaluating() {
        let line = plain(&DeliberationEvent::PhaseStarted {
            round: 2,
            phase: Phase::Answering,
        })
        .unwrap();
        assert_eq!(line, "-> Re-evaluating");
    }

    #[test]
    fn test_fallback_elimination_is_marked() {
        let line = plain(&DeliberationEvent::EliminationDecided {
            round: 1,
            eliminated: AgentId::from("model-c"),
            reasoning: String::new(),
            resolution: Resolution::Fallback,
        })
        .unwrap();
        assert!(line.ends_with("eliminated model-c (fallback)"));
    }

    #[test]
    fn test_arbiter_thinking_names_the_arbiter() {
        let line = plain(&DeliberationEvent::ArbiterThinking {
            round: 1,
            arbiter: AgentId::from("judge-x"),
        })
        .unwrap();
        assert_eq!(line, "  .. judge-x deciding");
    }

    #[test]
    fn test_quiet_events_have_no_line() {
        assert!(plain(&DeliberationEvent::Finished).is_none());
        assert!(
            plain(&DeliberationEvent::AgentThinking {
                round: 1,
                agent: AgentId::from("a"),
            })
            .is_none()
        );
        assert!(
            plain(&DeliberationEvent::VotesCollected {
                round: 1,
                votes: vec![]
            })
            .is_none()
        );
    }

    #[test]
    fn test_reporter_survives_full_sequence() {
        let reporter = ProgressReporter::new();
        let a = AgentId::from("a/model-a");
        reporter.emit(&DeliberationEvent::RoundStarted {
            round: 1,
            active: vec![a.clone()],
        });
        reporter.emit(&DeliberationEvent::PhaseStarted {
            round: 1,
            phase: Phase::Answering,
        });
        reporter.emit(&DeliberationEvent::AgentThinking {
            round: 1,
            agent: a.clone(),
        });
        reporter.emit(&DeliberationEvent::AgentAnswered {
            round: 1,
            agent: a.clone(),
            text: "x".to_string(),
            status: CallStatus::Ok,
        });
        reporter.emit(&DeliberationEvent::PhaseStarted {
            round: 1,
            phase: Phase::Ensemble,
        });
        reporter.emit(&DeliberationEvent::FinalAnswer {
            synthesizer: a,
            text: None,
            status: CallStatus::Failed,
            survivors: vec![],
        });
        reporter.emit(&DeliberationEvent::Finished);
        assert!(reporter.phase_bar.lock().unwrap().is_none());
    }
}
