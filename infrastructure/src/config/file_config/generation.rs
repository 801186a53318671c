//! Generation configuration from TOML (`[generation]` section)

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileGenerationConfig {
    /// Turns of history rendered into the answer prompt
    pub history_turns: usize,
    /// Bound on each model call, classifier included
    pub timeout_seconds: u64,
}

impl Default for FileGenerationConfig {
    fn default() -> Self {
        Self {
            history_turns: 6,
            timeout_seconds: 60,
        }
    }
}
