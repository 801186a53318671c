//! Model value object representing a Gemini model

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Gemini models known to the agent (Value Object)
///
/// Generation models serve both the classifier gate and the answer stage;
/// embedding models are only used to embed retrieval queries.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Model {
    // Generation models
    Gemini15FlashLatest,
    Gemini15ProLatest,
    Gemini20Flash,
    Gemini25Flash,
    Gemini25Pro,
    // Embedding models
    TextEmbedding004,
    // Custom
    Custom(String),
}

impl Model {
    /// Get the string identifier for this model
    pub fn as_str(&self) -> &str {
        match self {
            Model::Gemini15FlashLatest => "gemini-1.5-flash-latest",
            Model::Gemini15ProLatest => "gemini-1.5-pro-latest",
            Model::Gemini20Flash => "gemini-2.0-flash",
            Model::Gemini25Flash => "gemini-2.5-flash",
            Model::Gemini25Pro => "gemini-2.5-pro",
            Model::TextEmbedding004 => "text-embedding-004",
            Model::Custom(s) => s,
        }
    }

    /// Resolve a model name. Unknown names become [`Model::Custom`].
    pub fn from_name(name: &str) -> Self {
        match name {
            "gemini-1.5-flash-latest" => Model::Gemini15FlashLatest,
            "gemini-1.5-pro-latest" => Model::Gemini15ProLatest,
            "gemini-2.0-flash" => Model::Gemini20Flash,
            "gemini-2.5-flash" => Model::Gemini25Flash,
            "gemini-2.5-pro" => Model::Gemini25Pro,
            "text-embedding-004" => Model::TextEmbedding004,
            other => Model::Custom(other.to_string()),
        }
    }

    /// Default model for query embeddings
    pub fn default_embedding() -> Model {
        Model::TextEmbedding004
    }

    /// Check if this is an embedding model
    pub fn is_embedding(&self) -> bool {
        match self {
            Model::TextEmbedding004 => true,
            Model::Custom(name) => name.contains("embedding"),
            _ => false,
        }
    }
}

impl Default for Model {
    /// Returns the default generation model (Gemini 1.5 Flash)
    fn default() -> Self {
        Model::Gemini15FlashLatest
    }
}

impl std::fmt::Display for Model {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Model {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(Model::from_name(s))
    }
}

impl Serialize for Model {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Model {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ok(Model::from_name(&s))
    }
}
