//! Session store port
//!
//! Owns every session's history for the process lifetime.

use ganesha_domain::{SessionHistory, SessionId};
use std::sync::Arc;
use tokio::sync::Mutex;

/// Shared, lockable history of one session.
///
/// Holding the lock serializes requests for that session; the respond use
/// case keeps it from the history read until the turn pair is appended.
pub type SessionHandle = Arc<Mutex<SessionHistory>>;

/// Keyed collection of session histories.
///
/// Lookups must be short and never await, so different sessions only
/// contend for the map itself.
pub trait SessionStore: Send + Sync {
    /// Handle for `id`, creating an empty history on first reference
    fn session(&self, id: &SessionId) -> SessionHandle;

    /// Handle for `id` if the session has been referenced before
    fn existing(&self, id: &SessionId) -> Option<SessionHandle>;

    /// Number of sessions created so far
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
