//! Application-level configuration.
//!
//! - [`RagParams`]: history windows, retrieval depth and call timeouts
//! - [`ModelConfig`]: model per pipeline role

pub mod model_config;
pub mod rag_params;

pub use model_config::ModelConfig;
pub use rag_params::RagParams;
