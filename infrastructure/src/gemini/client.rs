//! HTTP client for the Gemini REST API

use super::error::{GeminiError, Result};
use super::protocol::{
    self, Content, EmbedContentRequest, EmbedContentResponse, GenerateContentRequest,
    GenerateContentResponse,
};
use ganesha_domain::Model;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::debug;

/// Public Gemini endpoint for model methods
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta/models";

const API_KEY_HEADER: &str = "x-goog-api-key";

/// Thin wrapper over `reqwest::Client` bound to one API key and base URL.
///
/// Created once at startup and shared by the gateway and the embedder.
#[derive(Clone)]
pub struct GeminiClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl std::fmt::Debug for GeminiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiClient")
            .field("base_url", &self.base_url)
            .field("api_key", &"<redacted>")
            .finish()
    }
}

impl GeminiClient {
    /// Build a client whose every request is bounded by `timeout`
    pub fn new(
        api_key: impl Into<String>,
        base_url: impl Into<String>,
        timeout: Option<Duration>,
    ) -> Result<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self::with_http_client(builder.build()?, api_key, base_url))
    }

    pub fn with_http_client(
        http: reqwest::Client,
        api_key: impl Into<String>,
        base_url: impl Into<String>,
    ) -> Self {
        Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
        }
    }

    /// Pick the explicit key if present, otherwise read `env_var`
    pub fn resolve_api_key(explicit: Option<&str>, env_var: &str) -> Result<String> {
        if let Some(key) = explicit.map(str::trim).filter(|k| !k.is_empty()) {
            return Ok(key.to_string());
        }
        std::env::var(env_var)
            .ok()
            .map(|k| k.trim().to_string())
            .filter(|k| !k.is_empty())
            .ok_or_else(|| GeminiError::MissingApiKey(env_var.to_string()))
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// `{base_url}/{model}:{method}`
    pub fn endpoint(&self, model: &Model, method: &str) -> String {
        format!("{}/{}:{}", self.base_url, model.as_str(), method)
    }

    /// Run `generateContent` with a single-turn prompt and return the reply text
    pub async fn generate_content(&self, model: &Model, prompt: &str) -> Result<String> {
        let url = self.endpoint(model, "generateContent");
        debug!("Gemini generateContent: model={}, {} bytes", model, prompt.len());

        let response: GenerateContentResponse = self
            .post(&url, &GenerateContentRequest::from_prompt(prompt))
            .await?;
        response.into_text()
    }

    /// Run `embedContent` and return the embedding vector
    pub async fn embed_content(&self, model: &Model, text: &str) -> Result<Vec<f32>> {
        let url = self.endpoint(model, "embedContent");
        let request = EmbedContentRequest {
            model: format!("models/{}", model.as_str()),
            content: Content::plain(text),
        };

        let response: EmbedContentResponse = self.post(&url, &request).await?;
        if response.embedding.values.is_empty() {
            return Err(GeminiError::EmptyEmbedding);
        }
        Ok(response.embedding.values)
    }

    async fn post<B: Serialize, R: DeserializeOwned>(&self, url: &str, body: &B) -> Result<R> {
        let response = self
            .http
            .post(url)
            .header(API_KEY_HEADER, &self.api_key)
            .json(body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(GeminiError::Api {
                status: status.as_u16(),
                message: protocol::error_message(&body),
            });
        }

        Ok(response.json::<R>().await?)
    }
}


#[cfg(test)]
mod tests {
    use super::test_server::{client, serve_once};
    use super::*;

    #[test]
    fn test_endpoint() {
        let client = GeminiClient::with_http_client(
            reqwest::Client::new(),
            "k",
            "https://example.test/v1beta/models/",
        );
        assert_eq!(
            client.endpoint(&Model::Gemini15FlashLatest, "generateContent"),
            "https://example.test/v1beta/models/gemini-1.5-flash-latest:generateContent"
        );
    }

    #[test]
    fn test_debug_redacts_key() {
        let client = GeminiClient::with_http_client(reqwest::Client::new(), "secret", "http://x");
        assert!(!format!("{:?}", client).contains("secret"));
    }

    #[test]
    fn test_resolve_api_key() {
        assert_eq!(
            GeminiClient::resolve_api_key(Some(" abc "), "GANESHA_TEST_UNSET_VAR").unwrap(),
            "abc"
        );
        assert!(matches!(
            GeminiClient::resolve_api_key(None, "GANESHA_TEST_UNSET_VAR"),
            Err(GeminiError::MissingApiKey(var)) if var == "GANESHA_TEST_UNSET_VAR"
        ));
        assert!(GeminiClient::resolve_api_key(Some("  "), "GANESHA_TEST_UNSET_VAR").is_err());
    }

    #[tokio::test]
    async fn test_generate_content_round_trip() {
        let (base_url, server) = serve_once(
            200,
            r#"{"candidates":[{"content":{"parts":[{"text":"YES"}],"role":"model"},"finishReason":"STOP"}]}"#,
        )
        .await;

        let reply = client(&base_url)
            .generate_content(&Model::Gemini15FlashLatest, "Is this about modaks?")
            .await
            .unwrap();
        assert_eq!(reply, "YES");

        let request = server.await.unwrap();
        assert!(request.starts_with("POST /gemini-1.5-flash-latest:generateContent "));
        assert!(request.to_lowercase().contains("x-goog-api-key: test-key"));
        assert!(request.contains("Is this about modaks?"));
    }

    #[tokio::test]
    async fn test_api_error_status_and_message() {
        let (base_url, server) = serve_once(
            400,
            r#"{"error":{"code":400,"message":"API key not valid.","status":"INVALID_ARGUMENT"}}"#,
        )
        .await;

        let err = client(&base_url)
            .generate_content(&Model::Gemini15FlashLatest, "hi")
            .await
            .unwrap_err();
        server.await.unwrap();

        match err {
            GeminiError::Api { status, message } => {
                assert_eq!(status, 400);
                assert_eq!(message, "INVALID_ARGUMENT: API key not valid.");
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_embed_content() {
        let (base_url, server) =
            serve_once(200, r#"{"embedding":{"values":[0.25,-0.5,1.0]}}"#).await;

        let values = client(&base_url)
            .embed_content(&Model::TextEmbedding004, "broken tusk")
            .await
            .unwrap();
        assert_eq!(values, vec![0.25, -0.5, 1.0]);

        let request = server.await.unwrap();
        assert!(request.starts_with("POST /text-embedding-004:embedContent "));
        assert!(request.contains("\"model\":\"models/text-embedding-004\""));
    }

    #[tokio::test]
    async fn test_empty_embedding_is_an_error() {
        let (base_url, server) = serve_once(200, r#"{"embedding":{"values":[]}}"#).await;

        let err = client(&base_url)
            .embed_content(&Model::TextEmbedding004, "x")
            .await
            .unwrap_err();
        server.await.unwrap();
        assert!(matches!(err, GeminiError::EmptyEmbedding));
    }
}
