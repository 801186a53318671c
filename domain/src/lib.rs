//! Domain layer for the Ganesha conversational agent
//!
//! This crate contains the core business logic, entities, and value objects.
//! It has no dependencies on infrastructure or presentation concerns.
//!
//! # Core Concepts
//!
//! ## Two-stage pipeline
//!
//! Every question first passes a **classifier gate** (a single-word
//! `YES`/`NO` model call, fail-closed) and only then reaches **grounded
//! generation**, where retrieved lore and recent turns are folded into the
//! answer prompt.
//!
//! ## Strict response schema
//!
//! Model output is semi-structured text. [`validate_and_parse`] extracts the
//! JSON object, sanitizes it and validates it into a [`GaneshResponse`], or
//! reports a [`ParseError`]. Every failure path has a canned response.

pub mod classification;
pub mod conversation;
pub mod core;
pub mod pipeline;
pub mod prompt;
pub mod response;
pub mod retrieval;

pub use classification::{ClassificationVerdict, ClassifierOutcome, parse_classifier_reply};
pub use conversation::{
    entities::{ConversationTurn, Role},
    history::SessionHistory,
};
pub use core::{
    error::DomainError, model::Model, question::Question, session_id::SessionId,
    string::{single_line, truncate},
};
pub use pipeline::Stage;
pub use prompt::PromptTemplate;
pub use response::{
    entities::GaneshResponse,
    language::Language,
    parsing::{ParseError, extract_json_object, strip_control_chars, validate_and_parse},
};
pub use retrieval::{ContextChunk, RetrievedContext};
