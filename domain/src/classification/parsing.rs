//! Classifier reply parsing

use super::outcome::ClassifierOutcome;

/// Map a raw classifier reply to an outcome.
///
/// The reply is trimmed and uppercased and must then be exactly `YES` or
/// `NO`. `"Yes."`, `"YES, it is"` and the empty string are all ambiguous.
pub fn parse_classifier_reply(reply: &str) -> ClassifierOutcome {
    let normalized = reply.trim().to_uppercase();
    match normalized.as_str() {
        "YES" => ClassifierOutcome::Yes,
        "NO" => ClassifierOutcome::No,
        _ => ClassifierOutcome::Ambiguous { reply: normalized },
    }
}
