//! Role-based model configuration.
//!
//! [`ModelConfig`] picks the model for each of the two calls a request
//! makes. It is a static value object; models don't change at runtime.

use ganesha_domain::Model;
use serde::{Deserialize, Serialize};

/// Model selection per pipeline role.
///
/// ```
/// use ganesha_application::ModelConfig;
/// use ganesha_domain::Model;
///
/// let config = ModelConfig::default().with_answer(Model::Gemini25Pro);
///
/// assert_eq!(config.classifier, Model::Gemini15FlashLatest);
/// assert_eq!(config.answer, Model::Gemini25Pro);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelConfig {
    /// Model answering the single-word topic check
    pub classifier: Model,
    /// Model producing the JSON answer
    pub answer: Model,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            classifier: Model::Gemini15FlashLatest,
            answer: Model::Gemini15FlashLatest,
        }
    }
}

impl ModelConfig {
    pub fn with_classifier(mut self, model: Model) -> Self {
        self.classifier = model;
        self
    }

    pub fn with_answer(mut self, model: Model) -> Self {
        self.answer = model;
        self
    }
}
