//! Parsing of answer-model output into a [`GaneshResponse`].
//!
//! The answer prompt demands a single JSON object, but models often wrap it
//! in prose or leak stray control bytes. Parsing therefore runs in explicit
//! steps, each usable on its own:
//!
//! | Step | Function | Failure |
//! |------|----------|---------|
//! | 1. Slice from the first `{` to the last `}` | [`extract_json_object`] | [`ParseError::NoJsonObject`] |
//! | 2. Drop ASCII control bytes `0x00..=0x1F` | [`strip_control_chars`] | |
//! | 3. Strict schema deserialization | [`validate_and_parse`] | [`ParseError::MalformedJson`] / [`ParseError::SchemaViolation`] |
//! | 4. Non-empty answer check | [`validate_and_parse`] | [`ParseError::EmptyAnswer`] |

use super::entities::{GaneshResponse, RawResponse};
use serde_json::error::Category;
use std::borrow::Cow;
use thiserror::Error;

/// Why a model reply could not be turned into a response
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("No JSON object found in the LLM response")]
    NoJsonObject,

    #[error("Malformed JSON: {0}")]
    MalformedJson(String),

    #[error("Response does not match schema: {0}")]
    SchemaViolation(String),

    #[error("Response answer is empty")]
    EmptyAnswer,
}

/// Slice the candidate JSON payload out of a model reply.
///
/// Returns everything from the first `{` through the last `}` inclusive,
/// or `None` when either delimiter is missing or they are out of order.
pub fn extract_json_object(raw: &str) -> Option<&str> {
    let start = raw.find('{')?;
    let end = raw.rfind('}')?;
    if end < start {
        return None;
    }
    Some(&raw[start..=end])
}

/// Remove ASCII control characters (`0x00..=0x1F`).
///
/// Borrows when there is nothing to strip.
pub fn strip_control_chars(s: &str) -> Cow<'_, str> {
    if s.chars().any(|c| c.is_ascii_control() && c != '\u{7f}') {
        Cow::Owned(
            s.chars()
                .filter(|c| !(c.is_ascii_control() && *c != '\u{7f}'))
                .collect(),
        )
    } else {
        Cow::Borrowed(s)
    }
}

/// Parse and validate a raw answer-model reply.
pub fn validate_and_parse(raw_text: &str) -> Result<GaneshResponse, ParseError> {
    let candidate = extract_json_object(raw_text).ok_or(ParseError::NoJsonObject)?;
    let sanitized = strip_control_chars(candidate);

    let raw: RawResponse = serde_json::from_str(&sanitized).map_err(|e| match e.classify() {
        Category::Data => ParseError::SchemaViolation(e.to_string()),
        Category::Syntax | Category::Eof | Category::Io => ParseError::MalformedJson(e.to_string()),
    })?;

    if raw.answer.trim().is_empty() {
        return Err(ParseError::EmptyAnswer);
    }

    Ok(GaneshResponse::from_raw(raw))
}
