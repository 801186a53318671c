//! GaneshResponse entity

use super::language::Language;
use serde::Deserialize;
use serde_json::{Map, Value};

/// The canonical structured reply returned for every request.
///
/// Invariants:
/// - `answer` is never empty, including on refusal paths
/// - `refusal_reason` is only populated when `refusal` is true
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GaneshResponse {
    pub lang: Language,
    pub blessing_open: String,
    pub answer: String,
    pub blessing_close: String,
    pub refusal: bool,
    pub refusal_reason: Option<String>,
}

/// Wire shape of a response as produced by the answer model.
///
/// `refusal` and `refusal_reason` may be omitted; everything else is required.
#[derive(Debug, Deserialize)]
pub(crate) struct RawResponse {
    pub lang: Language,
    pub blessing_open: String,
    pub answer: String,
    pub blessing_close: String,
    #[serde(default)]
    pub refusal: bool,
    #[serde(default)]
    pub refusal_reason: Option<String>,
}

impl GaneshResponse {
    /// A regular (non-refusal) answer
    pub fn new_answer(
        lang: Language,
        blessing_open: impl Into<String>,
        answer: impl Into<String>,
        blessing_close: impl Into<String>,
    ) -> Self {
        Self {
            lang,
            blessing_open: blessing_open.into(),
            answer: answer.into(),
            blessing_close: blessing_close.into(),
            refusal: false,
            refusal_reason: None,
        }
    }

    /// A refusal carrying a user-facing explanation in `answer`
    pub fn new_refusal(
        lang: Language,
        blessing_open: impl Into<String>,
        answer: impl Into<String>,
        blessing_close: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        let reason = reason.into();
        Self {
            lang,
            blessing_open: blessing_open.into(),
            answer: answer.into(),
            blessing_close: blessing_close.into(),
            refusal: true,
            refusal_reason: (!reason.trim().is_empty()).then_some(reason),
        }
    }

    pub(crate) fn from_raw(raw: RawResponse) -> Self {
        let refusal_reason = match raw.refusal_reason {
            Some(reason) if raw.refusal && !reason.trim().is_empty() => Some(reason),
            _ => None,
        };
        Self {
            lang: raw.lang,
            blessing_open: raw.blessing_open,
            answer: raw.answer,
            blessing_close: raw.blessing_close,
            refusal: raw.refusal,
            refusal_reason,
        }
    }

    /// Plain key/value mapping for JSON transport.
    ///
    /// A missing `refusal_reason` is emitted as an empty string, the same
    /// shape the answer model is asked to produce.
    pub fn to_transport_dict(&self) -> Map<String, Value> {
        let mut map = Map::new();
        map.insert("lang".to_string(), Value::String(self.lang.code().to_string()));
        map.insert(
            "blessing_open".to_string(),
            Value::String(self.blessing_open.clone()),
        );
        map.insert("answer".to_string(), Value::String(self.answer.clone()));
        map.insert(
            "blessing_close".to_string(),
            Value::String(self.blessing_close.clone()),
        );
        map.insert("refusal".to_string(), Value::Bool(self.refusal));
        map.insert(
            "refusal_reason".to_string(),
            Value::String(self.refusal_reason.clone().unwrap_or_default()),
        );
        map
    }

    /// Compact JSON text of the transport dict
    pub fn to_json_string(&self) -> String {
        Value::Object(self.to_transport_dict()).to_string()
    }

    /// Text handed to a speech synthesizer: opening blessing, answer and
    /// closing blessing, skipping empty parts.
    pub fn spoken_text(&self) -> String {
        [
            self.blessing_open.trim(),
            self.answer.trim(),
            self.blessing_close.trim(),
        ]
        .into_iter()
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
    }
}
