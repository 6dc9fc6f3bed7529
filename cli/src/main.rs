//! CLI entrypoint for interrogation-sim
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result, anyhow, bail};
use clap::Parser;
use interrogation_application::{
    ConversationLogger, Investigation, NoConversationLogger, NoProgress, ProgressNotifier,
};
use interrogation_domain::Credential;
use interrogation_infrastructure::{
    ConfigLoader, FileConfig, GeminiGateway, JsonlConversationLogger, TextFileExporter,
};
use interrogation_presentation::{
    Cli, ConsoleFormatter, InvestigationRepl, OutputFormat, ProgressReporter, ReplConfig,
};
use std::path::Path;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.show_config {
        ConfigLoader::print_config_sources(cli.config.as_deref());
        return Ok(());
    }

    // Keep the guard alive so the file writer flushes on exit
    let _log_guard = init_logging(cli.verbose, cli.log_file.as_deref())?;

    info!("Starting interrogation-sim");

    let config = load_config(&cli)?;

    if !config.output.color {
        colored::control::set_override(false);
    }

    // === Dependency Injection ===
    let gateway = Arc::new(GeminiGateway::new(config.gemini.clone())?);

    let conversation_logger: Arc<dyn ConversationLogger> =
        match config.logging.conversation_log.as_deref() {
            Some(path) => match JsonlConversationLogger::new(path) {
                Some(logger) => {
                    info!("Conversation log: {}", logger.path().display());
                    Arc::new(logger)
                }
                None => Arc::new(NoConversationLogger),
            },
            None => Arc::new(NoConversationLogger),
        };

    let progress: Arc<dyn ProgressNotifier> = if cli.quiet || !config.repl.show_progress {
        Arc::new(NoProgress)
    } else {
        Arc::new(ProgressReporter::new())
    };

    let investigation = Investigation::new(gateway)
        .with_conversation_logger(conversation_logger)
        .with_progress(progress)
        .with_exporter(Arc::new(TextFileExporter::new(&config.logging.export_dir)));

    if let Some(key) = config.gemini.resolve_api_key() {
        investigation.set_credential(Credential::new(key)?)?;
    }

    // One-shot mode
    if let Some(path) = &cli.precedent_file {
        if !investigation.has_credential() {
            bail!(
                "No API key. Set [gemini].api_key or the {} environment variable.",
                config.gemini.api_key_env
            );
        }

        let precedent = std::fs::read_to_string(path)
            .with_context(|| format!("Cannot read precedent file {}", path.display()))?;
        let outcome = investigation.submit_precedent(&precedent).await?;

        let output = match cli.output {
            OutputFormat::Text => ConsoleFormatter::format_case(&outcome),
            OutputFormat::Json => ConsoleFormatter::format_json(&outcome),
        };
        println!("{}", output);
        return Ok(());
    }

    let repl_config = ReplConfig {
        show_progress: config.repl.show_progress && !cli.quiet,
        history_file: config.repl.history_file.clone(),
    };
    InvestigationRepl::new(Arc::new(investigation))
        .with_config(repl_config)
        .run()
        .await?;

    Ok(())
}

/// Console logging by verbosity, plus an optional plain-text log file.
fn init_logging(verbose: u8, log_file: Option<&Path>) -> Result<Option<WorkerGuard>> {
    let filter = match verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"), // -vvv or more
    };

    let (file_layer, guard) = match log_file {
        Some(path) => {
            let file_name = path
                .file_name()
                .ok_or_else(|| anyhow!("--log-file must name a file: {}", path.display()))?;
            let dir = path
                .parent()
                .filter(|p| !p.as_os_str().is_empty())
                .unwrap_or_else(|| Path::new("."));
            std::fs::create_dir_all(dir)
                .with_context(|| format!("Cannot create log directory {}", dir.display()))?;

            let appender = tracing_appender::rolling::never(dir, file_name);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = fmt::layer().with_writer(writer).with_ansi(false);
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

fn load_config(cli: &Cli) -> Result<FileConfig> {
    let config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_deref())
            .map_err(|e| anyhow!("Failed to load configuration: {}", e))?
    };

    let issues = config.validate();
    for issue in issues.iter().filter(|i| !i.is_error()) {
        warn!("Config: {}", issue);
    }
    let errors: Vec<String> = issues
        .iter()
        .filter(|i| i.is_error())
        .map(|i| i.to_string())
        .collect();
    if !errors.is_empty() {
        bail!("Invalid configuration:\n  {}", errors.join("\n  "));
    }

    Ok(config)
}
