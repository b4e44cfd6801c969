//! Conversation-keyed session storage.
//!
//! The mapping from conversation identifier to session belongs to the
//! hosting web layer, so this store is a plain key-value container with a
//! caller-controlled lifecycle: it never initializes, queries, or cleans
//! up a session on its own. `remove` hands the session back so the caller
//! can `cleanup()` it before dropping.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::{Mutex, RwLock};

use crate::session::Session;

/// Shared handle to one stored session.
///
/// The mutex serializes discovery and dispatch per session, which is the
/// concurrency contract a single [`Session`] requires.
pub type SessionHandle = Arc<Mutex<Session>>;

/// In-memory map from conversation id to session.
pub struct SessionStore {
    sessions: RwLock<HashMap<String, SessionHandle>>,
}

impl SessionStore {
    /// An empty store.
    #[must_use]
    pub fn new() -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
        }
    }

    /// Insert a session under the given id, returning its handle.
    ///
    /// An existing session under the same id is replaced and dropped
    /// without cleanup; look it up and clean it up first if it may still
    /// own a live transport.
    pub async fn insert(&self, id: impl Into<String>, session: Session) -> SessionHandle {
        let handle = Arc::new(Mutex::new(session));
        self.sessions
            .write()
            .await
            .insert(id.into(), Arc::clone(&handle));
        handle
    }

    /// Look up the session for a conversation id.
    pub async fn get(&self, id: &str) -> Option<SessionHandle> {
        self.sessions.read().await.get(id).cloned()
    }

    /// Remove and return the session for a conversation id.
    pub async fn remove(&self, id: &str) -> Option<SessionHandle> {
        self.sessions.write().await.remove(id)
    }

    /// Ids of all stored sessions.
    pub async fn ids(&self) -> Vec<String> {
        self.sessions.read().await.keys().cloned().collect()
    }

    /// Number of stored sessions.
    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    /// Whether the store is empty.
    pub async fn is_empty(&self) -> bool {
        self.sessions.read().await.is_empty()
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}
