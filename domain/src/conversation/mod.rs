//! Conversation domain.
//!
//! - [`entities::ConversationTurn`]: one immutable user or agent turn
//! - [`history::SessionHistory`]: the ordered, pair-appended turns of a session

pub mod entities;
pub mod history;
