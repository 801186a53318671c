//! Context retriever over the in-memory lore index

use super::embedder::Embedder;
use super::index::LoreIndex;
use async_trait::async_trait;
use ganesha_application::{ContextRetriever, RetrievalError};
use ganesha_domain::{ContextChunk, RetrievedContext};
use std::sync::Arc;
use tracing::{debug, warn};

/// Embeds the query, then ranks index chunks by cosine similarity.
///
/// The index is shared read-only; only the embedding call does I/O.
pub struct VectorIndexRetriever {
    index: Arc<LoreIndex>,
    embedder: Arc<dyn Embedder>,
}

impl VectorIndexRetriever {
    pub fn new(index: Arc<LoreIndex>, embedder: Arc<dyn Embedder>) -> Self {
        if embedder.model_name() != index.embedding_model {
            warn!(
                "Query embedder '{}' differs from index model '{}'; similarity scores may be meaningless",
                embedder.model_name(),
                index.embedding_model
            );
        }
        Self { index, embedder }
    }
}

#[async_trait]
impl ContextRetriever for VectorIndexRetriever {
    async fn retrieve(&self, query: &str, k: usize) -> Result<RetrievedContext, RetrievalError> {
        let vector = self.embedder.embed(query).await?;
        if vector.len() != self.index.dimensions {
            return Err(RetrievalError::DimensionMismatch {
                expected: self.index.dimensions,
                actual: vector.len(),
            });
        }

        let hits = self.index.search(&vector, k);
        debug!(
            "Lore search returned {:?}",
            hits.iter()
                .map(|(c, s)| format!("{}={:.3}", c.id, s))
                .collect::<Vec<_>>()
        );

        Ok(hits
            .into_iter()
            .map(|(chunk, score)| {
                let mut context = ContextChunk::new(chunk.text.clone()).with_score(score);
                context.source = chunk.source.clone();
                context
            })
            .collect())
    }
}
