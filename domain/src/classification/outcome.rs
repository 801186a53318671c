//! Classification outcome types

use serde::{Deserialize, Serialize};

/// Whether a question may proceed to retrieval and generation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ClassificationVerdict {
    Allow,
    Reject,
}

impl ClassificationVerdict {
    pub fn is_allowed(&self) -> bool {
        matches!(self, ClassificationVerdict::Allow)
    }
}

/// What actually happened when the classifier was consulted.
///
/// `Ambiguous` and `Failed` are kept distinct for logging, but both map to
/// [`ClassificationVerdict::Reject`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClassifierOutcome {
    /// The model answered `YES`
    Yes,
    /// The model answered `NO`
    No,
    /// The model answered something other than `YES` or `NO`
    Ambiguous { reply: String },
    /// The classifier call errored, timed out or was cancelled
    Failed { error: String },
}

impl ClassifierOutcome {
    /// Fail-closed mapping to a verdict
    pub fn verdict(&self) -> ClassificationVerdict {
        match self {
            ClassifierOutcome::Yes => ClassificationVerdict::Allow,
            ClassifierOutcome::No
            | ClassifierOutcome::Ambiguous { .. }
            | ClassifierOutcome::Failed { .. } => ClassificationVerdict::Reject,
        }
    }

    /// True when the verdict was reached by defaulting rather than an explicit answer
    pub fn is_defaulted(&self) -> bool {
        matches!(
            self,
            ClassifierOutcome::Ambiguous { .. } | ClassifierOutcome::Failed { .. }
        )
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ClassifierOutcome::Yes => "yes",
            ClassifierOutcome::No => "no",
            ClassifierOutcome::Ambiguous { .. } => "ambiguous",
            ClassifierOutcome::Failed { .. } => "failed",
        }
    }
}

impl std::fmt::Display for ClassifierOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ClassifierOutcome::Ambiguous { reply } => write!(f, "ambiguous ('{}')", reply),
            ClassifierOutcome::Failed { error } => write!(f, "failed ({})", error),
            other => write!(f, "{}", other.as_str()),
        }
    }
}
