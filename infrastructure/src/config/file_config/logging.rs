//! Logging configuration from TOML (`[logging]` section)

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileLoggingConfig {
    /// JSONL transcript of classification, retrieval and generation events
    pub conversation_log: Option<String>,
    /// Directory for a daily-rolled tracing log file
    pub log_dir: Option<String>,
}
