//! Error types for the Gemini adapter

use ganesha_application::{GatewayError, RetrievalError};
use thiserror::Error;

/// Result type alias for Gemini operations
pub type Result<T> = std::result::Result<T, GeminiError>;

/// Errors that can occur when calling the Gemini REST API
#[derive(Error, Debug)]
pub enum GeminiError {
    #[error("No API key configured (set {0} or gemini.api_key)")]
    MissingApiKey(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Gemini API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Prompt blocked: {0}")]
    Blocked(String),

    #[error("Gemini returned no text in the response candidates")]
    EmptyCandidates,

    #[error("Gemini returned an empty embedding")]
    EmptyEmbedding,
}

impl GeminiError {
    /// Whether a later identical request could succeed
    pub fn is_retryable(&self) -> bool {
        match self {
            GeminiError::Http(e) => e.is_timeout() || e.is_connect(),
            GeminiError::Api { status, .. } => matches!(status, 429 | 500 | 502 | 503 | 504),
            _ => false,
        }
    }
}

impl From<GeminiError> for GatewayError {
    fn from(err: GeminiError) -> Self {
        match err {
            GeminiError::Http(e) if e.is_timeout() => GatewayError::Timeout,
            GeminiError::Http(e) if e.is_connect() => GatewayError::ConnectionError(e.to_string()),
            GeminiError::Api {
                status: 404,
                message,
            } => GatewayError::ModelNotAvailable(message),
            GeminiError::Api { status, message } => {
                GatewayError::RequestFailed(format!("status {}: {}", status, message))
            }
            GeminiError::Blocked(reason) => GatewayError::Blocked(reason),
            GeminiError::EmptyCandidates => GatewayError::EmptyResponse,
            other => GatewayError::Other(other.to_string()),
        }
    }
}

impl From<GeminiError> for RetrievalError {
    fn from(err: GeminiError) -> Self {
        RetrievalError::EmbeddingFailed(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_errors_map_to_gateway_errors() {
        let not_found = GatewayError::from(GeminiError::Api {
            status: 404,
            message: "models/nope is not found".to_string(),
        });
        assert!(matches!(not_found, GatewayError::ModelNotAvailable(_)));

        let overloaded = GatewayError::from(GeminiError::Api {
            status: 503,
            message: "overloaded".to_string(),
        });
        assert!(matches!(overloaded, GatewayError::RequestFailed(ref m) if m.contains("503")));

        assert!(matches!(
            GatewayError::from(GeminiError::Blocked("SAFETY".to_string())),
            GatewayError::Blocked(_)
        ));
        assert!(matches!(
            GatewayError::from(GeminiError::EmptyCandidates),
            GatewayError::EmptyResponse
        ));
    }

    #[test]
    fn test_retryable_statuses() {
        let api = |status| GeminiError::Api {
            status,
            message: String::new(),
        };
        assert!(api(429).is_retryable());
        assert!(api(503).is_retryable());
        assert!(!api(400).is_retryable());
        assert!(!GeminiError::EmptyCandidates.is_retryable());
    }
}
