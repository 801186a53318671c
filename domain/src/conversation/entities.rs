//! Conversation domain entities

use serde::{Deserialize, Serialize};

/// Author of a turn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Agent,
}

impl Role {
    /// Prefix used when a turn is rendered into prompt or query text.
    ///
    /// The agent speaks as the persona, so its turns are labelled `ganesha`.
    pub fn label(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Agent => "ganesha",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// A single turn in a session (Entity)
///
/// Agent turns hold the compact JSON transport form of the reply.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationTurn {
    role: Role,
    content: String,
}

impl ConversationTurn {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    pub fn agent(content: impl Into<String>) -> Self {
        Self {
            role: Role::Agent,
            content: content.into(),
        }
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    /// `"<role>: <content>"`
    pub fn render(&self) -> String {
        format!("{}: {}", self.role.label(), self.content)
    }
}
