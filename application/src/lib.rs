//! Application layer for the Ganesha conversational agent
//!
//! This crate contains the respond use case, port definitions, and
//! application configuration. It depends only on the domain layer.

pub mod config;
pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use config::{ModelConfig, RagParams};
pub use ports::{
    context_retriever::{ContextRetriever, RetrievalError},
    conversation_logger::{ConversationEvent, ConversationLogger, NoConversationLogger},
    llm_gateway::{GatewayError, LlmGateway},
    progress::{NoProgress, StageNotifier},
    session_store::{SessionHandle, SessionStore},
};
pub use use_cases::respond::{
    RespondError, RespondInput, RespondOutput, RespondUseCase, UserMessage,
};
