//! Headless model of the dashboard's chat widget.
//!
//! Keeps its own view of the conversation: user messages are shown before
//! the service answers, and any failure is rendered as a fixed apology
//! instead of being surfaced.

use std::sync::{Arc, Mutex, MutexGuard};

use learnhub_core::identity::{AuthUser, GUEST_USER_ID};
use uuid::Uuid;

use crate::error::ChatError;
use crate::service::ChatbotService;
use crate::types::ChatMessage;
use crate::voice::{RecognitionCallback, SpeechRecognitionOptions, SpeechRecognitionService};

/// Shown in place of a reply when the service fails.
pub const APOLOGY: &str = "Sorry, I'm having trouble connecting. Please try again later.";

pub struct ChatWidget {
    service: Arc<ChatbotService>,
    speech: Arc<SpeechRecognitionService>,
    user_id: String,
    session_id: Uuid,
    messages: Vec<ChatMessage>,
    // Shared with the speech callback, which overwrites it with each transcript.
    input: Arc<Mutex<String>>,
    is_typing: bool,
    is_open: bool,
}

impl ChatWidget {
    /// Open the widget for `user`, or for the guest session when nobody is
    /// signed in.
    pub fn new(
        service: Arc<ChatbotService>,
        speech: Arc<SpeechRecognitionService>,
        user: Option<&AuthUser>,
    ) -> Self {
        let user_id = user
            .map(|u| u.uid.clone())
            .unwrap_or_else(|| GUEST_USER_ID.to_string());
        let session = service.get_or_create_session(&user_id);
        Self {
            service,
            speech,
            user_id,
            session_id: session.id,
            messages: session.messages,
            input: Arc::new(Mutex::new(String::new())),
            is_typing: false,
            is_open: true,
        }
    }

    pub fn session_id(&self) -> Uuid {
        self.session_id
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn input(&self) -> String {
        lock_input(&self.input).clone()
    }

    pub fn set_input(&self, value: impl Into<String>) {
        *lock_input(&self.input) = value.into();
    }

    pub fn is_typing(&self) -> bool {
        self.is_typing
    }

    pub fn is_open(&self) -> bool {
        self.is_open
    }

    pub fn open(&mut self) {
        self.is_open = true;
    }

    /// Hide the widget. An in-flight reply still lands in the session.
    pub fn close(&mut self) {
        self.is_open = false;
    }

    pub fn speech_supported(&self) -> bool {
        self.speech.check_support()
    }

    pub fn is_listening(&self) -> bool {
        self.speech.is_listening()
    }

    /// Take the pending input for sending.
    ///
    /// Returns `None` for blank input. Otherwise shows the user message,
    /// clears the input, raises the typing indicator and returns the trimmed
    /// text to send.
    pub fn submit(&mut self) -> Option<String> {
        let raw = self.input();
        if raw.trim().is_empty() {
            return None;
        }
        self.messages.push(ChatMessage::user(raw.clone()));
        self.set_input("");
        self.is_typing = true;
        Some(raw.trim().to_string())
    }

    /// Render the outcome of a send and drop the typing indicator.
    pub fn receive(&mut self, result: Result<ChatMessage, ChatError>) -> &ChatMessage {
        let message = match result {
            Ok(reply) => reply,
            Err(e) => {
                tracing::error!(error = %e, "Error sending message to chatbot");
                ChatMessage::bot(APOLOGY)
            }
        };
        self.is_typing = false;
        self.messages.push(message);
        &self.messages[self.messages.len() - 1]
    }

    /// Send the pending input and render the reply. Returns the rendered bot
    /// message, or `None` if there was nothing to send.
    pub async fn send(&mut self) -> Option<ChatMessage> {
        let text = self.submit()?;
        let result = self.service.send_message(self.session_id, &text).await;
        Some(self.receive(result).clone())
    }

    /// Clear the conversation and reload it from the service.
    pub fn clear(&mut self) -> Result<(), ChatError> {
        self.service.clear_session_history(self.session_id)?;
        let session = self.service.get_or_create_session(&self.user_id);
        self.session_id = session.id;
        self.messages = session.messages;
        Ok(())
    }

    /// Start or stop voice input. Transcripts replace the pending input;
    /// final ones are not sent automatically. Returns whether the widget is
    /// listening afterwards.
    pub fn toggle_voice(&mut self) -> bool {
        if self.speech.is_listening() {
            self.speech.stop_listening();
            return false;
        }

        let input = Arc::clone(&self.input);
        let callback: RecognitionCallback = Arc::new(move |transcript: &str, _is_final: bool| {
            *lock_input(&input) = transcript.to_string();
        });
        let options = SpeechRecognitionOptions {
            continuous: false,
            interim_results: true,
            ..SpeechRecognitionOptions::default()
        };
        self.speech.start_listening(callback, options)
    }
}

fn lock_input(input: &Mutex<String>) -> MutexGuard<'_, String> {
    input.lock().unwrap_or_else(|poisoned| {
        tracing::warn!("Widget input lock poisoned; recovering");
        poisoned.into_inner()
    })
}

// =============================================================================
// Tests
// =============================================================================
