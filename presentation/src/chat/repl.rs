//! REPL (Read-Eval-Print Loop) for interactive chat

use super::request::respond_interruptibly;
use crate::ConsoleFormatter;
use crate::ProgressReporter;
use crate::ReplConfig;
use colored::Colorize;
use ganesha_application::{NoProgress, RespondInput, RespondUseCase};
use ganesha_domain::SessionId;
use rustyline::error::ReadlineError;
use rustyline::{DefaultEditor, Result as RlResult};

/// Slash commands understood by the REPL
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplCommand {
    Help,
    History,
    Session,
    Quit,
    Unknown(String),
}

impl ReplCommand {
    /// Parse a line starting with `/`
    pub fn parse(line: &str) -> Self {
        match line.split_whitespace().next().unwrap_or(line) {
            "/quit" | "/exit" | "/q" => ReplCommand::Quit,
            "/help" | "/h" | "/?" => ReplCommand::Help,
            "/history" => ReplCommand::History,
            "/session" => ReplCommand::Session,
            other => ReplCommand::Unknown(other.to_string()),
        }
    }
}

/// Interactive chat REPL bound to a single session
pub struct ChatRepl {
    use_case: RespondUseCase,
    session_id: SessionId,
    config: ReplConfig,
}

impl ChatRepl {
    pub fn new(use_case: RespondUseCase, session_id: SessionId) -> Self {
        Self {
            use_case,
            session_id,
            config: ReplConfig::default(),
        }
    }

    pub fn with_config(mut self, config: ReplConfig) -> Self {
        self.config = config;
        self
    }

    /// Run the interactive REPL
    pub async fn run(&self) -> RlResult<()> {
        let mut rl = DefaultEditor::new()?;

        let history_path = self.config.history_path();
        if let Some(ref path) = history_path {
            if let Some(parent) = path.parent() {
                let _ = std::fs::create_dir_all(parent);
            }
            let _ = rl.load_history(path);
        }

        self.print_welcome();

        loop {
            match rl.readline(">>> ") {
                Ok(line) => {
                    let line = line.trim();
                    if line.is_empty() {
                        continue;
                    }

                    if line.starts_with('/') {
                        if self.handle_command(ReplCommand::parse(line)).await {
                            break;
                        }
                        continue;
                    }

                    let _ = rl.add_history_entry(line);
                    self.process_message(line).await;
                }
                Err(ReadlineError::Interrupted) => {
                    println!("^C");
                    continue;
                }
                Err(ReadlineError::Eof) => {
                    println!("Shubham bhavatu!");
                    break;
                }
                Err(err) => {
                    eprintln!("Error: {:?}", err);
                    break;
                }
            }
        }

        if let Some(ref path) = history_path {
            let _ = rl.save_history(path);
        }

        Ok(())
    }

    fn print_welcome(&self) {
        println!();
        println!("╭─────────────────────────────────────────────╮");
        println!("│          Ganesha - Chat Mode                │");
        println!("╰─────────────────────────────────────────────╯");
        println!();
        println!(
            "Answer model: {}  Session: {}",
            self.use_case.models().answer,
            self.session_id
        );
        println!();
        Self::print_help();
    }

    fn print_help() {
        println!("Commands:");
        println!("  /help, /h, /?     - Show this help");
        println!("  /history          - Show this session's conversation");
        println!("  /session          - Show the session id");
        println!("  /quit, /exit, /q  - Exit chat");
        println!();
        println!("Press Ctrl-C while waiting to cancel a request.");
        println!();
    }

    /// Handle slash commands. Returns true if should exit.
    async fn handle_command(&self, command: ReplCommand) -> bool {
        match command {
            ReplCommand::Quit => {
                println!("Shubham bhavatu!");
                true
            }
            ReplCommand::Help => {
                println!();
                Self::print_help();
                false
            }
            ReplCommand::History => {
                let history = self
                    .use_case
                    .history(&self.session_id)
                    .await
                    .unwrap_or_default();
                println!();
                print!("{}", ConsoleFormatter::format_history(&history));
                println!();
                false
            }
            ReplCommand::Session => {
                println!("Session: {}", self.session_id.as_str().cyan());
                false
            }
            ReplCommand::Unknown(cmd) => {
                println!("Unknown command: {}", cmd);
                println!("Type /help for available commands");
                false
            }
        }
    }

    async fn process_message(&self, text: &str) {
        println!();

        let input = RespondInput::text(self.session_id.as_str(), text);
        let result = if self.config.show_progress {
            let progress = ProgressReporter::new();
            respond_interruptibly(&self.use_case, input, &progress).await
        } else {
            respond_interruptibly(&self.use_case, input, &NoProgress).await
        };

        match result {
            Ok(output) => println!("{}", ConsoleFormatter::format(&output.response)),
            Err(e) => eprintln!("Error: {}", e),
        }
        println!();
    }
}
