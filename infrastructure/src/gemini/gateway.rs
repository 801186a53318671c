//! Gemini LLM Gateway implementation

use super::client::GeminiClient;
use async_trait::async_trait;
use ganesha_application::{GatewayError, LlmGateway};
use ganesha_domain::Model;
use std::sync::Arc;
use tracing::debug;

/// LLM Gateway implementation backed by `generateContent`
pub struct GeminiLlmGateway {
    client: Arc<GeminiClient>,
}

impl GeminiLlmGateway {
    pub fn new(client: Arc<GeminiClient>) -> Self {
        Self { client }
    }

    /// Get a reference to the underlying client
    pub fn client(&self) -> &Arc<GeminiClient> {
        &self.client
    }
}

#[async_trait]
impl LlmGateway for GeminiLlmGateway {
    async fn generate(&self, model: &Model, prompt: &str) -> Result<String, GatewayError> {
        if model.is_embedding() {
            return Err(GatewayError::ModelNotAvailable(format!(
                "{} is an embedding model",
                model
            )));
        }

        let text = self.client.generate_content(model, prompt).await?;
        debug!("Gemini {} replied with {} bytes", model, text.len());
        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gemini::client::test_server::{client, serve_once};

    #[tokio::test]
    async fn test_generate_returns_candidate_text() {
        let (base_url, server) = serve_once(
            200,
            r#"{"candidates":[{"content":{"parts":[{"text":"{\"answer\":\"hi\"}"}]}}]}"#,
        )
        .await;
        let gateway = GeminiLlmGateway::new(Arc::new(client(&base_url)));

        let text = gateway
            .generate(&Model::Gemini15FlashLatest, "prompt")
            .await
            .unwrap();
        server.await.unwrap();
        assert_eq!(text, r#"{"answer":"hi"}"#);
    }

    #[tokio::test]
    async fn test_blocked_prompt_maps_to_gateway_error() {
        let (base_url, server) =
            serve_once(200, r#"{"promptFeedback":{"blockReason":"SAFETY"}}"#).await;
        let gateway = GeminiLlmGateway::new(Arc::new(client(&base_url)));

        let err = gateway
            .generate(&Model::Gemini15FlashLatest, "prompt")
            .await
            .unwrap_err();
        server.await.unwrap();
        assert!(matches!(err, GatewayError::Blocked(_)));
    }

    #[tokio::test]
    async fn test_embedding_model_is_refused_without_request() {
        let gateway = GeminiLlmGateway::new(Arc::new(client("http://127.0.0.1:9")));
        let err = gateway
            .generate(&Model::TextEmbedding004, "prompt")
            .await
            .unwrap_err();
        assert!(matches!(err, GatewayError::ModelNotAvailable(_)));
    }
}
