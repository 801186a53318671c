//! Prompt domain
//!
//! Templates for the two model calls of a request (classification and
//! answer generation) and for the conversational retrieval query.

mod template;

pub use template::PromptTemplate;
