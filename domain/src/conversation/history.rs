//! Session history aggregate

use super::entities::ConversationTurn;
use crate::response::entities::GaneshResponse;

/// Ordered turns of one session.
///
/// Turns can only be added as a user/agent pair through
/// [`push_exchange`](Self::push_exchange), so the sequence always alternates
/// user, agent, user, agent and never ends on an unanswered user turn.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionHistory {
    turns: Vec<ConversationTurn>,
}

impl SessionHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a user message and the reply it received
    pub fn push_exchange(&mut self, user_text: impl Into<String>, reply: &GaneshResponse) {
        self.turns.reserve(2);
        self.turns.push(ConversationTurn::user(user_text));
        self.turns.push(ConversationTurn::agent(reply.to_json_string()));
    }

    pub fn turns(&self) -> &[ConversationTurn] {
        &self.turns
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    /// Number of completed user/agent exchanges
    pub fn exchange_count(&self) -> usize {
        self.turns.len() / 2
    }

    /// The last `n` turns, oldest first
    pub fn recent(&self, n: usize) -> &[ConversationTurn] {
        let start = self.turns.len().saturating_sub(n);
        &self.turns[start..]
    }

    /// The last `n` turns rendered as `role: content` lines
    pub fn render_recent(&self, n: usize) -> String {
        self.recent(n)
            .iter()
            .map(ConversationTurn::render)
            .collect::<Vec<_>>()
            .join("\n")
    }
}
