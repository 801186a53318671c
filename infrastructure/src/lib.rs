//! Infrastructure layer for the Ganesha conversational agent
//!
//! This crate contains adapters that implement the ports defined in the
//! application layer: the Gemini gateway and embedder, the lore vector
//! index, the in-memory session store, configuration file loading, and the
//! JSONL conversation logger.

pub mod config;
pub mod gemini;
pub mod logging;
pub mod retrieval;
pub mod session;

// Re-export commonly used types
pub use config::{
    ConfigLoader, ConfigValidationError, FileConfig, FileGeminiConfig, FileGenerationConfig,
    FileLoggingConfig, FileModelsConfig, FileOutputConfig, FileReplConfig, FileRetrievalConfig,
};
pub use gemini::{
    client::{DEFAULT_BASE_URL, GeminiClient},
    embedder::GeminiEmbedder,
    error::GeminiError,
    gateway::GeminiLlmGateway,
};
pub use logging::JsonlConversationLogger;
pub use retrieval::{Embedder, IndexError, LoreIndex, VectorIndexRetriever};
pub use session::InMemorySessionStore;
