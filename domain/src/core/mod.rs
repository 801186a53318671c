//! Core domain concepts shared across all subdomains.
//!
//! - [`model::Model`]: Gemini models used for classification and answers
//! - [`question::Question`]: a validated user question
//! - [`session_id::SessionId`]: caller-supplied conversation identity
//! - [`error::DomainError`]: domain-level errors

pub mod error;
pub mod model;
pub mod question;
pub mod session_id;
pub mod string;
