//! Retrieval configuration from TOML (`[retrieval]` section)

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileRetrievalConfig {
    /// Path to the lore index JSON produced by the ingestion job
    pub index_path: String,
    /// Chunks retrieved per request
    pub top_k: usize,
    /// Turns of history folded into the retrieval query
    pub history_turns: usize,
    /// Bound on the retrieval call
    pub timeout_seconds: u64,
}

impl Default for FileRetrievalConfig {
    fn default() -> Self {
        Self {
            index_path: "lore_index.json".to_string(),
            top_k: 3,
            history_turns: 4,
            timeout_seconds: 15,
        }
    }
}
