//! Interactive chat module
//!
//! Provides a readline-based interactive chat interface and the
//! Ctrl-C aware request runner shared with single-question mode.

mod repl;
mod request;

pub use repl::{ChatRepl, ReplCommand};
pub use request::respond_interruptibly;
