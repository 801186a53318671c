//! Retrieved lore context

mod context;

pub use context::{ContextChunk, RetrievedContext};
