//! Error types for the learning assistant.

/// Errors from the chat service.
#[derive(Debug, thiserror::Error)]
pub enum ChatError {
    #[error("chat is disabled")]
    Disabled,
    #[error("message cannot be empty")]
    EmptyMessage,
    #[error("message exceeds maximum length of {0} characters")]
    MessageTooLong(usize),
    #[error("chat session not found: {0}")]
    SessionNotFound(uuid::Uuid),
    #[error("remote AI error: {0}")]
    Remote(String),
    #[error("voice error: {0}")]
    VoiceError(String),
}

impl From<reqwest::Error> for ChatError {
    fn from(err: reqwest::Error) -> Self {
        ChatError::Remote(err.to_string())
    }
}
