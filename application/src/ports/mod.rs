//! Port definitions (interfaces) for the application layer
//!
//! Ports define the boundaries between the application and external systems.
//! Adapters in the infrastructure and presentation layers implement these
//! traits.

pub mod context_retriever;
pub mod conversation_logger;
pub mod llm_gateway;
pub mod progress;
pub mod session_store;
