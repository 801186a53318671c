//! Role-based model configuration from TOML (`[models]` section)

use ganesha_application::ModelConfig;
use ganesha_domain::Model;
use serde::{Deserialize, Serialize};

/// Model names per role
///
/// ```toml
/// [models]
/// classifier = "gemini-1.5-flash-latest"   # single-word topic check
/// answer = "gemini-2.5-flash"              # JSON answer
/// embedding = "text-embedding-004"         # query embedding, must match the index
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileModelsConfig {
    pub classifier: String,
    pub answer: String,
    pub embedding: String,
}

impl Default for FileModelsConfig {
    fn default() -> Self {
        Self {
            classifier: Model::Gemini15FlashLatest.to_string(),
            answer: Model::Gemini15FlashLatest.to_string(),
            embedding: Model::default_embedding().to_string(),
        }
    }
}

impl FileModelsConfig {
    /// Names of blank model fields, for validation
    pub(super) fn empty_fields(&self) -> Vec<&'static str> {
        [
            ("models.classifier", &self.classifier),
            ("models.answer", &self.answer),
            ("models.embedding", &self.embedding),
        ]
        .into_iter()
        .filter(|(_, name)| name.trim().is_empty())
        .map(|(field, _)| field)
        .collect()
    }

    pub fn to_model_config(&self) -> ModelConfig {
        ModelConfig::default()
            .with_classifier(Model::from_name(self.classifier.trim()))
            .with_answer(Model::from_name(self.answer.trim()))
    }

    pub fn embedding_model(&self) -> Model {
        Model::from_name(self.embedding.trim())
    }
}
