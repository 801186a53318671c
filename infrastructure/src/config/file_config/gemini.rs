//! Gemini API configuration from TOML (`[gemini]` section)

use crate::gemini::client::DEFAULT_BASE_URL;
use serde::{Deserialize, Serialize};

/// Raw Gemini API configuration
///
/// ```toml
/// [gemini]
/// api_key_env = "GENAI_API_KEY"   # read the key from this variable
/// # api_key = "..."               # or set it directly
/// base_url = "https://generativelanguage.googleapis.com/v1beta/models"
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileGeminiConfig {
    /// API key; takes precedence over `api_key_env`
    pub api_key: Option<String>,
    /// Environment variable holding the API key
    pub api_key_env: String,
    pub base_url: String,
}

impl Default for FileGeminiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            api_key_env: "GENAI_API_KEY".to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }
}
