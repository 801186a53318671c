//! Fixed replies that never involve the answer model.

use super::entities::GaneshResponse;
use super::language::Language;

/// Reason recorded when the classifier gate rejects a question
pub const ROUTER_REJECTION_REASON: &str = "Inappropriate topic classified by router";

/// Prefix of the reason recorded when generation or parsing fails
pub const GENERATION_FAILURE_PREFIX: &str = "LLM call or JSON parsing failed";

/// Reason recorded when a speech transcription came back empty
pub const EMPTY_TRANSCRIPTION_REASON: &str = "Empty transcription";

impl GaneshResponse {
    /// Redirect for questions outside the persona's realm
    pub fn router_rejection() -> Self {
        Self::new_refusal(
            Language::English,
            "",
            "My child, my wisdom is for matters of the spirit. Your question seems to be \
             outside this realm. Please ask about life's obstacles, wisdom, or our sacred \
             traditions.",
            "May you find the guidance you seek.",
            ROUTER_REJECTION_REASON,
        )
    }

    /// Polite "please rephrase" reply; the diagnostic stays in `refusal_reason`
    pub fn generation_failure(diagnostic: impl std::fmt::Display) -> Self {
        Self::new_refusal(
            Language::English,
            "",
            "I heard your words, but my thoughts are unclear at this moment. Please rephrase \
             your question, and I shall try again to offer guidance.",
            "",
            format!("{}: {}", GENERATION_FAILURE_PREFIX, diagnostic),
        )
    }

    /// Apology for an audio message that transcribed to nothing
    pub fn empty_transcription() -> Self {
        Self::new_refusal(
            Language::English,
            "",
            "I am sorry, I could not hear anything in your message. Please speak clearly.",
            "",
            EMPTY_TRANSCRIPTION_REASON,
        )
    }

    /// Check whether this reply came from the classifier gate
    pub fn is_router_rejection(&self) -> bool {
        self.refusal && self.refusal_reason.as_deref() == Some(ROUTER_REJECTION_REASON)
    }

    /// Check whether this reply is the generation fallback
    pub fn is_generation_failure(&self) -> bool {
        self.refusal
            && self
                .refusal_reason
                .as_deref()
                .is_some_and(|r| r.starts_with(GENERATION_FAILURE_PREFIX))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canned_replies_are_refusals_with_answers() {
        for response in [
            GaneshResponse::router_rejection(),
            GaneshResponse::generation_failure("timeout"),
            GaneshResponse::empty_transcription(),
        ] {
            assert!(response.refusal);
            assert!(!response.answer.trim().is_empty());
            assert!(response.refusal_reason.is_some());
        }
    }

    #[test]
    fn test_generation_failure_keeps_diagnostic() {
        let response = GaneshResponse::generation_failure("No JSON object found");
        assert_eq!(
            response.refusal_reason.as_deref(),
            Some("LLM call or JSON parsing failed: No JSON object found")
        );
        assert!(!response.answer.contains("No JSON object found"));
        assert!(response.is_generation_failure());
        assert!(!response.is_router_rejection());
    }

    #[test]
    fn test_router_rejection_detection() {
        assert!(GaneshResponse::router_rejection().is_router_rejection());
        assert!(!GaneshResponse::empty_transcription().is_router_rejection());
    }
}
