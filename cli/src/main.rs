//! CLI entrypoint for LLM Council
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result, anyhow, bail};
use clap::Parser;
use council_application::{
    CompositeEventSink, EventSink, RunCouncilError, RunCouncilInput, RunCouncilUseCase,
};
use council_domain::OutputFormat;
use council_infrastructure::{ConfigLoader, FileConfig, HttpCompletionService, JsonlTranscriptLogger};
use council_presentation::{Cli, ConsoleFormatter, JsonEventPrinter, ProgressReporter, SimpleProgress};
use std::io::IsTerminal;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Keep the guard alive so the log file is flushed on exit
    let _log_guard = init_tracing(cli.verbose, cli.log_file.as_deref())?;

    info!("Starting LLM Council");

    if cli.show_config {
        for line in ConfigLoader::describe_sources() {
            println!("{}", line);
        }
        return Ok(());
    }

    let mut config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_deref()).context("Failed to load configuration")?
    };
    apply_overrides(&mut config, &cli);

    let issues = config.validate();
    let mut errors = 0;
    for issue in &issues {
        if issue.is_error() {
            errors += 1;
            eprintln!("error: {}", issue);
        } else {
            warn!("{}", issue);
        }
    }
    if errors > 0 {
        bail!("Invalid configuration ({} error(s)). See --show-config for sources.", errors);
    }

    let question = match cli.question.clone() {
        Some(q) => q,
        None => bail!("Question is required."),
    };

    let Some(roster) = config.council.to_roster() else {
        bail!("No council configured. Use -m/--member and --arbiter, or a config file.");
    };
    let settings = config.provider.resolve().map_err(|issue| anyhow!("{}", issue))?;

    if !config.output.color {
        colored::control::set_override(false);
    }
    let format: OutputFormat = cli
        .output
        .map(Into::into)
        .or(config.output.format)
        .unwrap_or_default();

    // === Dependency Injection ===
    let service = Arc::new(
        HttpCompletionService::new(settings).context("Failed to create completion client")?,
    );
    info!(endpoint = service.endpoint(), "Completion service ready");
    let use_case = RunCouncilUseCase::new(service);

    let input = RunCouncilInput::new(question, roster)
        .with_params(config.to_params())
        .with_parser(config.council.elimination_parser);

    let cancel = CancellationToken::new();
    {
        let cancel = cancel.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                warn!("Interrupted, cancelling deliberation");
                cancel.cancel();
            }
        });
    }

    // Event consumers
    let transcript = cli
        .transcript
        .clone()
        .or_else(|| config.output.transcript.as_ref().map(PathBuf::from))
        .and_then(|path| JsonlTranscriptLogger::new(&path));
    let progress: Option<Box<dyn EventSink>> = if cli.quiet || format.is_machine_readable() {
        None
    } else if std::io::stderr().is_terminal() {
        Some(Box::new(ProgressReporter::new()))
    } else {
        Some(Box::new(SimpleProgress))
    };
    let printer = (format == OutputFormat::Events).then(JsonEventPrinter::stdout);

    let mut sink = CompositeEventSink::new(Vec::new());
    if let Some(progress) = progress.as_deref() {
        sink.push(progress);
    }
    if let Some(transcript) = transcript.as_ref() {
        info!("Writing transcript to {}", transcript.path().display());
        sink.push(transcript);
    }
    if let Some(printer) = printer.as_ref() {
        sink.push(printer);
    }

    let outcome = match use_case.execute_with_events(input, &sink, &cancel).await {
        Ok(outcome) => outcome,
        Err(RunCouncilError::Cancelled { round }) => {
            bail!("Deliberation cancelled during round {}", round)
        }
        Err(e) => return Err(e.into()),
    };

    let output = match format {
        OutputFormat::Final => ConsoleFormatter::format_final_only(&outcome),
        OutputFormat::Full => ConsoleFormatter::format(&outcome),
        OutputFormat::Json => ConsoleFormatter::format_json(&outcome),
        // Already streamed line by line
        OutputFormat::Events => return Ok(()),
    };

    println!("{}", output);

    Ok(())
}

/// Initialize logging based on verbosity level
///
/// `RUST_LOG` wins over `-v` when set. With `log_file`, logs are also written
/// to that file through a non-blocking writer.
fn init_tracing(verbose: u8, log_file: Option<&Path>) -> Result<Option<WorkerGuard>> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(match verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace", // -vvv or more
        })
    });

    let (file_layer, guard) = match log_file {
        Some(path) => {
            let name = path
                .file_name()
                .with_context(|| format!("Invalid log file path: {}", path.display()))?;
            let dir = path
                .parent()
                .filter(|p| !p.as_os_str().is_empty())
                .unwrap_or_else(|| Path::new("."));
            std::fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create log directory {}", dir.display()))?;

            let appender = tracing_appender::rolling::never(dir, name);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = fmt::layer()
                .with_ansi(false)
                .with_target(false)
                .with_writer(writer);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .with(file_layer)
        .init();

    Ok(guard)
}

/// Command-line flags override every configuration source
fn apply_overrides(config: &mut FileConfig, cli: &Cli) {
    if !cli.member.is_empty() {
        config.council.members = cli.member.clone();
    }
    if let Some(arbiter) = &cli.arbiter {
        config.council.arbiter = Some(arbiter.clone());
    }
    if let Some(synthesizer) = &cli.synthesizer {
        config.council.synthesizer = Some(synthesizer.clone());
    }
    if let Some(parser) = cli.parser {
        config.council.elimination_parser = parser.into();
    }
    if cli.sequential {
        config.council.parallel = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use council_domain::ParserKind;

    #[test]
    fn test_cli_overrides_config() {
        let mut config = FileConfig::default();
        config.council.members = vec!["from-file".to_string()];
        config.council.arbiter = Some("file-judge".to_string());

        let cli = Cli::try_parse_from([
            "llm-council",
            "-m",
            "model-a",
            "-m",
            "model-b",
            "--parser",
            "marker-line",
            "--sequential",
            "Why?",
        ])
        .unwrap();
        apply_overrides(&mut config, &cli);

        assert_eq!(config.council.members, vec!["model-a", "model-b"]);
        assert_eq!(config.council.arbiter.as_deref(), Some("file-judge"));
        assert_eq!(config.council.elimination_parser, ParserKind::MarkerLine);
        assert!(!config.council.parallel);
        assert!(!config.to_params().parallel);
    }

    #[test]
    fn test_no_flags_keep_config() {
        let mut config = FileConfig::default();
        config.council.members = vec!["from-file".to_string()];
        let before = config.council.clone();

        let cli = Cli::try_parse_from(["llm-council", "Why?"]).unwrap();
        apply_overrides(&mut config, &cli);

        assert_eq!(config.council, before);
    }
}
