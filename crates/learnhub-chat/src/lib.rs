//! Learning-assistant chatbot for the LearnHub dashboard.
//!
//! Provides the per-user session store, the two-path message router
//! (remote AI backend, then keyword rules), a headless chat-widget model,
//! and the speech-recognition wrapper used for voice input.

pub mod error;
pub mod intent;
pub mod remote;
pub mod router;
pub mod service;
pub mod session;
pub mod types;
pub mod voice;
pub mod widget;

pub use error::ChatError;
pub use intent::{normalize_input, Intent, DEFAULT_RESPONSES};
pub use remote::{AiBackend, CompletionRequest, HttpAiBackend, RemoteOutcome, SimulatedAiBackend};
pub use router::{MessageRouter, ReplySource, RoutedReply};
pub use service::ChatbotService;
pub use session::SessionStore;
pub use types::{ChatMessage, ChatSession, Sender, GREETING};
pub use voice::{
    RecognitionCallback, ScriptedRecognizer, SpeechRecognitionOptions, SpeechRecognitionService,
    SpeechRecognizer, UnsupportedRecognizer,
};
pub use widget::{ChatWidget, APOLOGY};
