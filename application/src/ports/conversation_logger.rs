//! Port for structured conversation logging.
//!
//! Defines the [`ConversationLogger`] trait for recording what happened to
//! each request (classifier verdict, retrieved sources, generation result,
//! fallbacks) to a structured log.
//!
//! This is separate from `tracing`-based operation logs: tracing handles
//! human-readable diagnostic messages, while this port captures a
//! machine-readable transcript (JSONL).

use serde_json::Value;

/// A structured conversation event for logging.
///
/// The adapter adds the timestamp when the event is written.
pub struct ConversationEvent {
    /// Event type identifier (`classification`, `retrieval`, `generation`, `fallback`)
    pub event_type: &'static str,
    /// JSON payload with event-specific data.
    pub payload: Value,
}

impl ConversationEvent {
    pub fn new(event_type: &'static str, payload: Value) -> Self {
        Self {
            event_type,
            payload,
        }
    }
}

/// Port for logging conversation events to a structured log.
///
/// `log` is synchronous and infallible; write failures are the adapter's
/// problem and must not disturb the request.
pub trait ConversationLogger: Send + Sync {
    /// Record a conversation event.
    fn log(&self, event: ConversationEvent);
}

/// No-op implementation for tests and when logging is disabled.
pub struct NoConversationLogger;

impl ConversationLogger for NoConversationLogger {
    fn log(&self, _event: ConversationEvent) {}
}
