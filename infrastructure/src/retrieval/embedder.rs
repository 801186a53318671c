//! Query embedding seam for the vector retriever

use async_trait::async_trait;
use ganesha_application::RetrievalError;

/// Turns query text into a vector comparable with the index embeddings
#[async_trait]
pub trait Embedder: Send + Sync {
    /// Name of the embedding model, checked against the index at startup
    fn model_name(&self) -> &str;

    async fn embed(&self, text: &str) -> Result<Vec<f32>, RetrievalError>;
}
