//! Context retriever port
//!
//! Looks up lore chunks relevant to a conversational query.

use async_trait::async_trait;
use ganesha_domain::RetrievedContext;
use thiserror::Error;

/// Errors raised while retrieving context for a request
#[derive(Error, Debug)]
pub enum RetrievalError {
    #[error("Embedding failed: {0}")]
    EmbeddingFailed(String),

    #[error("Dimension mismatch: index has {expected}, query has {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("Retriever unavailable: {0}")]
    Unavailable(String),
}

/// Similarity search over the lore knowledge base.
///
/// The underlying index is read-only at request time, so implementations
/// can be shared freely between concurrent requests.
#[async_trait]
pub trait ContextRetriever: Send + Sync {
    /// Return up to `k` chunks for `query`, most similar first
    async fn retrieve(&self, query: &str, k: usize) -> Result<RetrievedContext, RetrievalError>;
}
