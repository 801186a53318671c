//! Intent classification gate.
//!
//! The classifier model answers a single word. [`parse_classifier_reply`]
//! turns that word into a [`ClassifierOutcome`], and
//! [`ClassifierOutcome::verdict`] applies the fail-closed policy: only an
//! explicit `YES` lets a question through.

mod outcome;
mod parsing;

pub use outcome::{ClassificationVerdict, ClassifierOutcome};
pub use parsing::parse_classifier_reply;
