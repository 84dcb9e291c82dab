//! In-memory chat session store.
//!
//! Holds exactly one session per user id. Sessions are created lazily and
//! live until the process exits.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use chrono::Utc;
use uuid::Uuid;

use crate::error::ChatError;
use crate::types::{ChatMessage, ChatSession};

#[derive(Default)]
struct StoreInner {
    by_user: HashMap<String, ChatSession>,
    user_by_session: HashMap<Uuid, String>,
}

impl StoreInner {
    fn session_mut(&mut self, session_id: Uuid) -> Result<&mut ChatSession, ChatError> {
        let user_id = self
            .user_by_session
            .get(&session_id)
            .ok_or(ChatError::SessionNotFound(session_id))?;
        self.by_user
            .get_mut(user_id)
            .ok_or(ChatError::SessionNotFound(session_id))
    }

    fn session(&self, session_id: Uuid) -> Result<&ChatSession, ChatError> {
        self.user_by_session
            .get(&session_id)
            .and_then(|user_id| self.by_user.get(user_id))
            .ok_or(ChatError::SessionNotFound(session_id))
    }
}

/// Session store keyed by user id, with a session-id index for lookups
/// coming from the widget and the API.
#[derive(Default)]
pub struct SessionStore {
    inner: Mutex<StoreInner>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the user's session, creating one seeded with the greeting if
    /// none exists yet.
    pub fn get_or_create_session(&self, user_id: &str) -> ChatSession {
        let mut inner = self.lock();
        if let Some(session) = inner.by_user.get(user_id) {
            return session.clone();
        }

        let session = ChatSession::new(user_id);
        tracing::debug!(session_id = %session.id, user_id, "Created chat session");
        inner.user_by_session.insert(session.id, user_id.to_string());
        inner.by_user.insert(user_id.to_string(), session.clone());
        session
    }

    /// Snapshot of a session by id.
    pub fn session(&self, session_id: Uuid) -> Option<ChatSession> {
        self.lock().session(session_id).ok().cloned()
    }

    /// Reset a session to the single greeting message.
    pub fn clear_session_history(&self, session_id: Uuid) -> Result<(), ChatError> {
        let mut inner = self.lock();
        inner.session_mut(session_id)?.reset();
        tracing::debug!(%session_id, "Cleared chat history");
        Ok(())
    }

    /// Owned copy of a session's messages. Mutating it does not touch the
    /// stored session.
    pub fn get_session_history(&self, session_id: Uuid) -> Result<Vec<ChatMessage>, ChatError> {
        let inner = self.lock();
        Ok(inner.session(session_id)?.messages.clone())
    }

    /// Append a message to a session and bump its `updated_at`.
    pub fn append_message(&self, session_id: Uuid, message: ChatMessage) -> Result<(), ChatError> {
        let mut inner = self.lock();
        let session = inner.session_mut(session_id)?;
        session.messages.push(message);
        session.updated_at = Utc::now();
        Ok(())
    }

    pub fn session_count(&self) -> usize {
        self.lock().by_user.len()
    }

    // No code path panics while holding the lock, so a poisoned guard still
    // holds consistent data.
    fn lock(&self) -> MutexGuard<'_, StoreInner> {
        self.inner.lock().unwrap_or_else(|poisoned| {
            tracing::warn!("Session store lock poisoned; recovering");
            poisoned.into_inner()
        })
    }
}

// =============================================================================
// Tests
// =============================================================================
