//! Context chunks returned by a retriever for a single request.

/// One chunk of lore text
#[derive(Debug, Clone, PartialEq)]
pub struct ContextChunk {
    pub text: String,
    /// Document the chunk was cut from, when the index records it
    pub source: Option<String>,
    /// Similarity to the query (higher is closer)
    pub score: Option<f32>,
}

impl ContextChunk {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            source: None,
            score: None,
        }
    }

    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    pub fn with_score(mut self, score: f32) -> Self {
        self.score = Some(score);
        self
    }
}

/// Ordered chunks, most relevant first. Transient, lives for one request.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RetrievedContext {
    chunks: Vec<ContextChunk>,
}

impl RetrievedContext {
    pub fn new(chunks: Vec<ContextChunk>) -> Self {
        Self { chunks }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn chunks(&self) -> &[ContextChunk] {
        &self.chunks
    }

    pub fn len(&self) -> usize {
        self.chunks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }

    /// Chunk texts separated by a blank line, ready for the answer prompt
    pub fn joined(&self) -> String {
        self.chunks
            .iter()
            .map(|c| c.text.as_str())
            .collect::<Vec<_>>()
            .join("\n\n")
    }

    /// Distinct source names in rank order
    pub fn sources(&self) -> Vec<&str> {
        let mut seen: Vec<&str> = Vec::new();
        for source in self.chunks.iter().filter_map(|c| c.source.as_deref()) {
            if !seen.contains(&source) {
                seen.push(source);
            }
        }
        seen
    }
}

impl FromIterator<ContextChunk> for RetrievedContext {
    fn from_iter<T: IntoIterator<Item = ContextChunk>>(iter: T) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
