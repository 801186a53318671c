//! CLI command definitions

use clap::Parser;
use std::path::PathBuf;

/// CLI arguments for ganesha
#[derive(Parser, Debug)]
#[command(name = "ganesha")]
#[command(author, version, about = "Ganesha - a conversational agent grounded in lore")]
#[command(long_about = r#"
Ganesha answers questions in the voice of Lord Ganesha, grounded in a
pre-built index of lore passages.

Each message goes through three steps:
1. Topic check: a small model decides whether the question is in scope
2. Retrieval: the most relevant lore passages are looked up
3. Answer: the answer model replies with blessings, in the user's language

Configuration files are loaded from (in priority order):
1. --config <path>                 Explicit config file
2. ./ganesha.toml                  Project-level config
3. ~/.config/ganesha/config.toml   Global config

Environment variables prefixed with GANESHA_ override file values
(e.g. GANESHA_RETRIEVAL__TOP_K=5).

Example:
  ganesha "Why do you ride a mouse?"
  ganesha --session family-chat "Tell me about Diwali"
  ganesha --chat
"#)]
pub struct Cli {
    /// The message to send (not required in chat mode)
    pub question: Option<String>,

    /// Session id; messages sharing an id share one history
    #[arg(short, long, value_name = "ID", default_value = "cli")]
    pub session: String,

    /// Start interactive chat mode
    #[arg(short, long)]
    pub chat: bool,

    /// Treat the message as a speech-to-text transcription
    #[arg(long)]
    pub transcript: bool,

    /// Print the response as a JSON object
    #[arg(long)]
    pub json: bool,

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
}

impl Cli {
    /// Default tracing filter directive for the `-v` count
    pub fn log_level(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }
}
