//! Response schema domain.
//!
//! - [`entities::GaneshResponse`]: the canonical structured reply
//! - [`language::Language`]: closed set of reply languages
//! - [`parsing`]: extraction and validation of LLM output
//! - [`canned`]: fixed replies used when the pipeline cannot answer

pub mod canned;
pub mod entities;
pub mod language;
pub mod parsing;
