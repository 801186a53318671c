//! CLI entrypoint for Ganesha
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result, anyhow, bail};
use clap::Parser;
use ganesha_application::{NoProgress, RespondInput, RespondUseCase};
use ganesha_domain::SessionId;
use ganesha_infrastructure::{
    ConfigLoader, FileConfig, GeminiClient, GeminiEmbedder, GeminiLlmGateway,
    InMemorySessionStore, JsonlConversationLogger, LoreIndex, VectorIndexRetriever,
};
use ganesha_presentation::{
    ChatRepl, Cli, ConsoleFormatter, ProgressReporter, ReplConfig, respond_interruptibly,
};
use std::io;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};
use tracing_appender::non_blocking::{NonBlocking, WorkerGuard};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.show_config {
        ConfigLoader::print_config_sources(cli.config.as_ref());
        return Ok(());
    }

    // === Configuration ===
    let config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_ref())
            .map_err(|e| anyhow!("Failed to load configuration: {}", e))?
    };
    config.validate().context("Invalid configuration")?;

    let _log_guard = init_logging(&cli, &config);

    if !config.output.color {
        colored::control::set_override(false);
    }

    info!("Starting Ganesha");

    let use_case = build_use_case(&config)?;

    // Chat mode
    if cli.chat {
        let session_id =
            SessionId::try_new(cli.session.clone()).context("--session cannot be blank")?;
        let repl_config = ReplConfig::default()
            .with_progress(config.repl.show_progress && !cli.quiet)
            .with_history_file(config.repl.history_file.as_ref().map(PathBuf::from));

        ChatRepl::new(use_case, session_id)
            .with_config(repl_config)
            .run()
            .await?;
        return Ok(());
    }

    // Single question mode - question is required
    let question = match cli.question {
        Some(ref q) => q.clone(),
        None => bail!("A question is required. Use --chat for interactive mode."),
    };

    let input = if cli.transcript {
        RespondInput::transcription(&cli.session, question)
    } else {
        RespondInput::text(&cli.session, question)
    };

    let output = if cli.quiet || cli.json {
        respond_interruptibly(&use_case, input, &NoProgress).await?
    } else {
        let progress = ProgressReporter::new();
        respond_interruptibly(&use_case, input, &progress).await?
    };

    let text = if cli.json {
        ConsoleFormatter::format_json(&output.response)
    } else if cli.verbose > 0 {
        ConsoleFormatter::format_output(&output)
    } else {
        ConsoleFormatter::format(&output.response)
    };
    println!("{}", text);

    Ok(())
}

/// Install the tracing subscriber: stderr always, plus a daily file when
/// `logging.log_dir` is set. The returned guard flushes the file on drop.
fn init_logging(cli: &Cli, config: &FileConfig) -> Option<WorkerGuard> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(cli.log_level()));

    let console_layer = tracing_subscriber::fmt::layer()
        .with_target(false)
        .with_writer(std::io::stderr);

    let mut dir_error = None;
    let (file_layer, guard) = match config.logging.log_dir.as_deref().map(daily_log_writer) {
        Some(Ok((writer, guard))) => {
            let layer = tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_ansi(false)
                .with_writer(writer);
            (Some(layer), Some(guard))
        }
        Some(Err(e)) => {
            dir_error = Some(e);
            (None, None)
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(console_layer)
        .with(file_layer)
        .init();

    if let Some(e) = dir_error {
        warn!("File logging disabled: {}", e);
    }

    guard
}

/// Non-blocking writer for `ganesha.log` in `dir`, rolled daily
fn daily_log_writer(dir: &str) -> io::Result<(NonBlocking, WorkerGuard)> {
    std::fs::create_dir_all(dir).map_err(|e| {
        io::Error::new(e.kind(), format!("could not create log directory {}: {}", dir, e))
    })?;
    let appender = tracing_appender::rolling::daily(dir, "ganesha.log");
    Ok(tracing_appender::non_blocking(appender))
}

/// Wire the Gemini adapters, lore index and session store into the use case
fn build_use_case(config: &FileConfig) -> Result<RespondUseCase> {
    let api_key = GeminiClient::resolve_api_key(
        config.gemini.api_key.as_deref(),
        &config.gemini.api_key_env,
    )?;
    let client = Arc::new(GeminiClient::new(
        api_key,
        config.gemini.base_url.clone(),
        Some(Duration::from_secs(config.generation.timeout_seconds)),
    )?);

    let index_path = &config.retrieval.index_path;
    let index = LoreIndex::load(index_path)
        .with_context(|| format!("Failed to load lore index from {}", index_path))?;
    info!("Loaded lore index: {} chunks", index.len());

    let embedder = Arc::new(GeminiEmbedder::new(
        client.clone(),
        config.models.embedding_model(),
    ));
    let retriever = Arc::new(VectorIndexRetriever::new(Arc::new(index), embedder));
    let gateway = Arc::new(GeminiLlmGateway::new(client));

    let mut use_case =
        RespondUseCase::new(gateway, retriever, Arc::new(InMemorySessionStore::new()))
            .with_models(config.models.to_model_config())
            .with_params(config.rag_params());

    if let Some(path) = config.logging.conversation_log.as_deref() {
        match JsonlConversationLogger::new(path) {
            Some(logger) => {
                info!("Conversation log: {}", logger.path().display());
                use_case = use_case.with_conversation_logger(Arc::new(logger));
            }
            None => warn!("Could not open conversation log at {}", path),
        }
    }

    Ok(use_case)
}
