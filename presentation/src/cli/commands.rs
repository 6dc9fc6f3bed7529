//! CLI command definitions

use clap::{Parser, ValueEnum};
use interrogation_domain::OutputFormat as DomainOutputFormat;
use std::path::PathBuf;

/// Output format for one-shot case results
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable sections
    Text,
    /// JSON object
    Json,
}

impl From<OutputFormat> for DomainOutputFormat {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Text => DomainOutputFormat::Text,
            OutputFormat::Json => DomainOutputFormat::Json,
        }
    }
}

/// CLI arguments for interrogation-sim
#[derive(Parser, Debug)]
#[command(name = "interrogation-sim")]
#[command(author, version, about = "Interrogation role-play trainer backed by a generative model")]
#[command(long_about = r#"
interrogation-sim builds a practice case from a legal precedent and lets you
question three simulated characters about it: the complainant, a witness, and
the suspect.

1. Case: the precedent becomes a case overview, key issues, and an
   investigation plan, plus an emotional complaint letter
2. Interrogation: each character keeps its own conversation and log
3. Summary: every answer refreshes a summary of that character's log

The API key is read from [gemini].api_key, the variable named by
[gemini].api_key_env (GEMINI_API_KEY by default), or set with /key.

Configuration files are loaded from (in priority order):
1. INTERROGATION_<SECTION>__<KEY>                  Environment
2. --config <path>                                 Explicit config file
3. ./interrogation.toml                            Project-level config
4. ~/.config/interrogation-sim/config.toml         Global config

Example:
  interrogation-sim
  interrogation-sim --precedent-file precedent.txt --output json
"#)]
pub struct Cli {
    /// Build a case from this precedent file, print it, and exit
    #[arg(short, long, value_name = "PATH")]
    pub precedent_file: Option<PathBuf>,

    /// Output format for --precedent-file
    #[arg(short, long, value_enum, default_value = "text")]
    pub output: OutputFormat,

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

    /// Also write diagnostic logs to this file
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}
