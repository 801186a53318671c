//! Gemini REST adapter
//!
//! [`GeminiClient`](client::GeminiClient) speaks the two endpoints this
//! application needs (`generateContent` and `embedContent`).
//! [`GeminiLlmGateway`](gateway::GeminiLlmGateway) and
//! [`GeminiEmbedder`](embedder::GeminiEmbedder) adapt it to the
//! application ports.

pub mod client;
pub mod embedder;
pub mod error;
pub mod gateway;
pub mod protocol;
