//! On-disk lore index produced by the offline ingestion job.
//!
//! ```json
//! {
//!   "embedding_model": "text-embedding-004",
//!   "dimensions": 768,
//!   "chunks": [
//!     { "id": "tusk-0", "source": "tusk.md", "text": "...", "embedding": [0.1, ...] }
//!   ]
//! }
//! ```
//!
//! The index is loaded once at startup and never mutated afterwards.

use super::similarity::top_k_by_cosine;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

/// Errors raised while loading the lore index. All of them are fatal at startup.
#[derive(Error, Debug)]
pub enum IndexError {
    #[error("Failed to read lore index {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Malformed lore index: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("Lore index contains no chunks")]
    Empty,

    #[error("Lore index declares zero dimensions")]
    ZeroDimensions,

    #[error("Chunk '{chunk_id}' has {actual} dimensions, index declares {expected}")]
    DimensionMismatch {
        chunk_id: String,
        expected: usize,
        actual: usize,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndexedChunk {
    pub id: String,
    #[serde(default)]
    pub source: Option<String>,
    pub text: String,
    pub embedding: Vec<f32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoreIndex {
    /// Model the chunk embeddings were produced with
    pub embedding_model: String,
    pub dimensions: usize,
    pub chunks: Vec<IndexedChunk>,
}

impl LoreIndex {
    /// Read and validate an index file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, IndexError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| IndexError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let index = Self::from_json(&content)?;
        info!(
            "Loaded lore index {} ({} chunks, {} dimensions, model {})",
            path.display(),
            index.len(),
            index.dimensions,
            index.embedding_model
        );
        Ok(index)
    }

    /// Parse and validate an index from JSON text
    pub fn from_json(json: &str) -> Result<Self, IndexError> {
        let index: LoreIndex = serde_json::from_str(json)?;
        index.validate()?;
        Ok(index)
    }

    /// Check that the index is non-empty and every embedding has the declared width
    pub fn validate(&self) -> Result<(), IndexError> {
        if self.dimensions == 0 {
            return Err(IndexError::ZeroDimensions);
        }
        if self.chunks.is_empty() {
            return Err(IndexError::Empty);
        }
        if let Some(bad) = self
            .chunks
            .iter()
            .find(|c| c.embedding.len() != self.dimensions)
        {
            return Err(IndexError::DimensionMismatch {
                chunk_id: bad.id.clone(),
                expected: self.dimensions,
                actual: bad.embedding.len(),
            });
        }
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.chunks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }

    /// The `k` chunks closest to `query`, best first, with their scores
    pub fn search(&self, query: &[f32], k: usize) -> Vec<(&IndexedChunk, f32)> {
        top_k_by_cosine(
            query,
            self.chunks.iter().map(|c| c.embedding.as_slice()),
            k,
        )
        .into_iter()
        .map(|(idx, score)| (&self.chunks[idx], score))
        .collect()
    }
}
