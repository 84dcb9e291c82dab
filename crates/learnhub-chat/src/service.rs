//! Chatbot service: the session store wired to the message router.
//!
//! One instance is built at startup and shared by reference; tests build
//! their own.

use learnhub_core::config::{ChatConfig, LearnHubConfig};
use uuid::Uuid;

use crate::error::ChatError;
use crate::router::{MessageRouter, ReplySource};
use crate::session::SessionStore;
use crate::types::{ChatMessage, ChatSession};

pub struct ChatbotService {
    store: SessionStore,
    router: MessageRouter,
    config: ChatConfig,
}

impl ChatbotService {
    pub fn new(router: MessageRouter, config: ChatConfig) -> Self {
        Self {
            store: SessionStore::new(),
            router,
            config,
        }
    }

    pub fn from_config(config: &LearnHubConfig) -> Result<Self, ChatError> {
        Ok(Self::new(
            MessageRouter::from_config(config)?,
            config.chat.clone(),
        ))
    }

    pub fn get_or_create_session(&self, user_id: &str) -> ChatSession {
        self.store.get_or_create_session(user_id)
    }

    pub fn session(&self, session_id: Uuid) -> Option<ChatSession> {
        self.store.session(session_id)
    }

    pub fn session_count(&self) -> usize {
        self.store.session_count()
    }

    /// Whether replies are first requested from a remote backend.
    pub fn has_remote(&self) -> bool {
        self.router.has_remote()
    }

    pub fn clear_session_history(&self, session_id: Uuid) -> Result<(), ChatError> {
        self.store.clear_session_history(session_id)
    }

    pub fn get_session_history(&self, session_id: Uuid) -> Result<Vec<ChatMessage>, ChatError> {
        self.store.get_session_history(session_id)
    }

    /// Append the user's message, compute and append the bot reply, and
    /// return the reply.
    ///
    /// Any text is accepted, including blank text; input limits are applied
    /// by callers through [`validate_message`](Self::validate_message).
    pub async fn send_message(&self, session_id: Uuid, text: &str) -> Result<ChatMessage, ChatError> {
        self.send_routed(session_id, text)
            .await
            .map(|(message, _)| message)
    }

    /// Like [`send_message`](Self::send_message), also reporting whether the
    /// reply came from the remote backend or the keyword rules.
    ///
    /// The user message is appended before the reply is computed and is not
    /// rolled back if a later step fails. No lock is held while the reply is
    /// computed, so overlapping sends may interleave.
    pub async fn send_routed(
        &self,
        session_id: Uuid,
        text: &str,
    ) -> Result<(ChatMessage, ReplySource), ChatError> {
        if !self.config.enabled {
            return Err(ChatError::Disabled);
        }

        self.store
            .append_message(session_id, ChatMessage::user(text))?;
        let history = self.store.get_session_history(session_id)?;

        let reply = self.router.route(text, &history).await;
        let message = ChatMessage::bot(reply.content);
        self.store.append_message(session_id, message.clone())?;

        tracing::debug!(%session_id, source = ?reply.source, "Bot reply appended");
        Ok((message, reply.source))
    }

    /// Check user input against the configured limits: non-blank, and at
    /// most `max_message_length` characters.
    pub fn validate_message(&self, text: &str) -> Result<(), ChatError> {
        if text.trim().is_empty() {
            return Err(ChatError::EmptyMessage);
        }
        if text.chars().count() > self.config.max_message_length {
            return Err(ChatError::MessageTooLong(self.config.max_message_length));
        }
        Ok(())
    }
}

// =============================================================================
// Tests
// =============================================================================
