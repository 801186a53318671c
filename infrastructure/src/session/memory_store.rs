//! In-memory session store.
//!
//! Sessions live for the process lifetime and are never evicted. The map
//! lock is held only for lookup/insert; request-long serialization happens
//! on the per-session `tokio::sync::Mutex` handed out as a
//! [`SessionHandle`].

use ganesha_application::{SessionHandle, SessionStore};
use ganesha_domain::SessionId;
use std::collections::HashMap;
use std::sync::RwLock;
use tracing::debug;

#[derive(Default)]
pub struct InMemorySessionStore {
    sessions: RwLock<HashMap<SessionId, SessionHandle>>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStore for InMemorySessionStore {
    fn session(&self, id: &SessionId) -> SessionHandle {
        if let Some(handle) = self.existing(id) {
            return handle;
        }

        // a poisoned map is still consistent: inserts are single operations
        let mut sessions = self
            .sessions
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        sessions
            .entry(id.clone())
            .or_insert_with(|| {
                debug!("Creating session {}", id);
                SessionHandle::default()
            })
            .clone()
    }

    fn existing(&self, id: &SessionId) -> Option<SessionHandle> {
        self.sessions
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .get(id)
            .cloned()
    }

    fn len(&self) -> usize {
        self.sessions
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .len()
    }
}
