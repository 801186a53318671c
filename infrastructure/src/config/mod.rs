//! Configuration file loading
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. `GANESHA_*` environment variables
//! 2. `--config <path>` specified file
//! 3. Project root: `./ganesha.toml` or `./.ganesha.toml`
//! 4. Global: `$XDG_CONFIG_HOME/ganesha/config.toml`
//! 5. Default values

mod file_config;
mod loader;

pub use file_config::{
    ConfigValidationError, FileConfig, FileGeminiConfig, FileGenerationConfig,
    FileLoggingConfig, FileModelsConfig, FileOutputConfig, FileReplConfig, FileRetrievalConfig,
};
pub use loader::{ConfigLoader, ENV_PREFIX};
