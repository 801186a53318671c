//! Query embedder backed by `embedContent`

use super::client::GeminiClient;
use crate::retrieval::Embedder;
use async_trait::async_trait;
use ganesha_application::RetrievalError;
use ganesha_domain::Model;
use std::sync::Arc;

pub struct GeminiEmbedder {
    client: Arc<GeminiClient>,
    model: Model,
}

impl GeminiEmbedder {
    pub fn new(client: Arc<GeminiClient>, model: Model) -> Self {
        Self { client, model }
    }
}

#[async_trait]
impl Embedder for GeminiEmbedder {
    fn model_name(&self) -> &str {
        self.model.as_str()
    }

    async fn embed(&self, text: &str) -> Result<Vec<f32>, RetrievalError> {
        Ok(self.client.embed_content(&self.model, text).await?)
    }
}
