//! LLM Gateway port
//!
//! Defines the interface for communicating with the text generation backend.

use async_trait::async_trait;
use ganesha_domain::Model;
use thiserror::Error;

/// Errors that can occur during LLM gateway operations
#[derive(Error, Debug)]
pub enum GatewayError {
    #[error("Connection error: {0}")]
    ConnectionError(String),

    #[error("Model not available: {0}")]
    ModelNotAvailable(String),

    #[error("Request failed: {0}")]
    RequestFailed(String),

    #[error("Prompt blocked: {0}")]
    Blocked(String),

    #[error("Empty response from model")]
    EmptyResponse,

    #[error("Timeout")]
    Timeout,

    #[error("Other error: {0}")]
    Other(String),
}

/// Gateway for LLM communication
///
/// A single-shot prompt-in, text-out call. Both the classifier and the
/// answer stage go through this port; they differ only in model and prompt.
/// Implementations (adapters) live in the infrastructure layer.
#[async_trait]
pub trait LlmGateway: Send + Sync {
    /// Send `prompt` to `model` and return the raw text of the reply
    async fn generate(&self, model: &Model, prompt: &str) -> Result<String, GatewayError>;
}
