//! CLI command definitions

use clap::{Parser, ValueEnum};
use council_domain::ParserKind;
use std::path::PathBuf;

/// Output format for council results
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Only the final master answer
    Final,
    /// Full formatted output with every round
    Full,
    /// The complete outcome as JSON
    Json,
    /// Every deliberation event as one JSON line, as it happens
    Events,
}

impl From<OutputFormat> for council_domain::OutputFormat {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Final => council_domain::OutputFormat::Final,
            OutputFormat::Full => council_domain::OutputFormat::Full,
            OutputFormat::Json => council_domain::OutputFormat::Json,
            OutputFormat::Events => council_domain::OutputFormat::Events,
        }
    }
}

/// How the arbiter's free-text decision is read
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum EliminationParserArg {
    /// First active agent id found in the text, in roster order
    EnumerationOrder,
    /// Agent named on an `ELIMINATE:` line
    MarkerLine,
}

impl From<EliminationParserArg> for ParserKind {
    fn from(arg: EliminationParserArg) -> Self {
        match arg {
            EliminationParserArg::EnumerationOrder => ParserKind::EnumerationOrder,
            EliminationParserArg::MarkerLine => ParserKind::MarkerLine,
        }
    }
}

/// CLI arguments for llm-council
#[derive(Parser, Debug)]
#[command(name = "llm-council")]
#[command(author, version, about = "LLM Council - Agents answer, vote and eliminate until one answer remains")]
#[command(long_about = r#"
LLM Council puts one question to a council of agents and runs an elimination
tournament until a single master answer remains.

Each round:
1. Answering: every active agent answers (later rounds refine their answer)
2. Voting: every agent names the weakest anonymized answer
3. Arbiter: the arbiter reads the votes and eliminates one agent

With two agents left, both answers and the eliminated agents' last answers
are merged by the synthesizer into the final answer.

Configuration files are loaded from (in priority order):
1. --config <path>     Explicit config file
2. ./council.toml      Project-level config
3. ~/.config/llm-council/config.toml   Global config

Example:
  llm-council "What's the best way to handle errors in Rust?"
  llm-council -m model-a -m model-b -m model-c --arbiter model-x "Compare async runtimes"
  llm-council -o events "Explain borrowing" > run.jsonl
"#)]
pub struct Cli {
    /// The question to ask the council
    pub question: Option<String>,

    /// Council members (can be specified multiple times)
    #[arg(short, long, value_name = "AGENT")]
    pub member: Vec<String>,

    /// Agent deciding eliminations (and synthesizing by default)
    #[arg(long, value_name = "AGENT")]
    pub arbiter: Option<String>,

    /// Agent merging the surviving answers, if not the arbiter
    #[arg(long, value_name = "AGENT")]
    pub synthesizer: Option<String>,

    /// Strategy used to read the arbiter's decision
    #[arg(long, value_enum, value_name = "STRATEGY")]
    pub parser: Option<EliminationParserArg>,

    /// Call agents one at a time instead of concurrently
    #[arg(long)]
    pub sequential: bool,

    /// Output format (defaults to the config file, then `final`)
    #[arg(short, long, value_enum)]
    pub output: Option<OutputFormat>,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress progress indicators
    #[arg(short, long)]
    pub quiet: bool,

    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long)]
    pub no_config: bool,

    /// Show configuration file locations and exit
    #[arg(long)]
    pub show_config: bool,

    /// Write every deliberation event to this JSONL file
    #[arg(long, value_name = "PATH")]
    pub transcript: Option<PathBuf>,

    /// Also write logs to this file
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}
