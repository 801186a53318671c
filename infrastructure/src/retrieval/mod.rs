//! Lore retrieval: on-disk vector index, similarity ranking, and the
//! [`ContextRetriever`](ganesha_application::ContextRetriever) adapter.

mod embedder;
mod index;
mod retriever;
mod similarity;

pub use embedder::Embedder;
pub use index::{IndexError, IndexedChunk, LoreIndex};
pub use retriever::VectorIndexRetriever;
pub use similarity::{cosine_similarity, top_k_by_cosine};
