//! Stages a single request passes through.
//!
//! ```text
//! Received -> Classifying -> Rejected
//!                         -> Retrieving -> Generating -> Parsed
//!                                                     -> GenerationFailed
//! ```

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    Received,
    Classifying,
    Rejected,
    Retrieving,
    Generating,
    Parsed,
    GenerationFailed,
}

impl Stage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::Received => "received",
            Stage::Classifying => "classifying",
            Stage::Rejected => "rejected",
            Stage::Retrieving => "retrieving",
            Stage::Generating => "generating",
            Stage::Parsed => "parsed",
            Stage::GenerationFailed => "generation_failed",
        }
    }

    /// Human-readable label used by progress output
    pub fn display_name(&self) -> &'static str {
        match self {
            Stage::Received => "Received",
            Stage::Classifying => "Checking the question",
            Stage::Rejected => "Declined",
            Stage::Retrieving => "Searching the lore",
            Stage::Generating => "Composing an answer",
            Stage::Parsed => "Answered",
            Stage::GenerationFailed => "Fell back to an apology",
        }
    }

    /// Whether the request ends in this stage
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            Stage::Rejected | Stage::Parsed | Stage::GenerationFailed
        )
    }
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
