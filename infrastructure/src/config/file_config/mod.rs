//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! Every section is `#[serde(default)]`, so a partial file only overrides
//! the keys it names.

mod gemini;
mod generation;
mod logging;
mod models;
mod output;
mod repl;
mod retrieval;

pub use gemini::FileGeminiConfig;
pub use generation::FileGenerationConfig;
pub use logging::FileLoggingConfig;
pub use models::FileModelsConfig;
pub use output::FileOutputConfig;
pub use repl::FileReplConfig;
pub use retrieval::FileRetrievalConfig;

use ganesha_application::RagParams;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

/// Configuration validation errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigValidationError {
    #[error("{0}: timeout_seconds cannot be 0")]
    InvalidTimeout(&'static str),

    #[error("retrieval.top_k cannot be 0")]
    InvalidTopK,

    #[error("{0}: model name cannot be empty")]
    EmptyModelName(&'static str),

    #[error("retrieval.index_path cannot be empty")]
    EmptyIndexPath,
}

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    pub gemini: FileGeminiConfig,
    pub models: FileModelsConfig,
    pub retrieval: FileRetrievalConfig,
    pub generation: FileGenerationConfig,
    pub logging: FileLoggingConfig,
    pub repl: FileReplConfig,
    pub output: FileOutputConfig,
}

impl FileConfig {
    /// Validate the configuration, stopping at the first problem
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if let Some(field) = self.models.empty_fields().into_iter().next() {
            return Err(ConfigValidationError::EmptyModelName(field));
        }
        if self.retrieval.index_path.trim().is_empty() {
            return Err(ConfigValidationError::EmptyIndexPath);
        }
        if self.retrieval.top_k == 0 {
            return Err(ConfigValidationError::InvalidTopK);
        }
        if self.retrieval.timeout_seconds == 0 {
            return Err(ConfigValidationError::InvalidTimeout("retrieval"));
        }
        if self.generation.timeout_seconds == 0 {
            return Err(ConfigValidationError::InvalidTimeout("generation"));
        }
        Ok(())
    }

    /// Pipeline parameters for the respond use case
    pub fn rag_params(&self) -> RagParams {
        RagParams::default()
            .with_retrieval_history_turns(self.retrieval.history_turns)
            .with_top_k(self.retrieval.top_k)
            .with_prompt_history_turns(self.generation.history_turns)
            .with_retrieval_timeout(Some(Duration::from_secs(self.retrieval.timeout_seconds)))
            .with_llm_timeout(Some(Duration::from_secs(self.generation.timeout_seconds)))
    }
}
