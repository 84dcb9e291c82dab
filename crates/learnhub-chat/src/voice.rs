//! Speech-to-text wrapper for voice input.
//!
//! The platform recognizer sits behind [`SpeechRecognizer`]; this module only
//! tracks listening state and forwards `(transcript, is_final)` events.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use crate::error::ChatError;

/// Callback receiving every interim and final transcript.
pub type RecognitionCallback = Arc<dyn Fn(&str, bool) + Send + Sync>;

/// Settings handed to the recognizer on each start.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpeechRecognitionOptions {
    /// BCP 47 language tag.
    pub language: String,
    /// Keep listening after the first final result.
    pub continuous: bool,
    /// Deliver partial transcripts while the user is speaking.
    pub interim_results: bool,
    pub max_alternatives: u32,
}

impl Default for SpeechRecognitionOptions {
    fn default() -> Self {
        Self {
            language: "en-US".to_string(),
            continuous: false,
            interim_results: true,
            max_alternatives: 1,
        }
    }
}

/// A platform speech recognizer.
pub trait SpeechRecognizer: Send + Sync {
    fn is_supported(&self) -> bool;

    /// Begin recognition, delivering results to `callback`.
    fn start(
        &self,
        options: &SpeechRecognitionOptions,
        callback: RecognitionCallback,
    ) -> Result<(), ChatError>;

    fn stop(&self);
}

/// Recognizer for platforms without speech support.
#[derive(Debug, Default, Clone)]
pub struct UnsupportedRecognizer;

impl SpeechRecognizer for UnsupportedRecognizer {
    fn is_supported(&self) -> bool {
        false
    }

    fn start(
        &self,
        _options: &SpeechRecognitionOptions,
        _callback: RecognitionCallback,
    ) -> Result<(), ChatError> {
        Err(ChatError::VoiceError(
            "speech recognition is not supported on this platform".to_string(),
        ))
    }

    fn stop(&self) {}
}

/// Recognizer that replays a fixed list of results on start, then accepts
/// further results through [`emit`](Self::emit).
#[derive(Default)]
pub struct ScriptedRecognizer {
    script: Vec<(String, bool)>,
    callback: Mutex<Option<RecognitionCallback>>,
    last_options: Mutex<Option<SpeechRecognitionOptions>>,
    fail_start: bool,
}

impl ScriptedRecognizer {
    pub fn new(script: Vec<(String, bool)>) -> Self {
        Self {
            script,
            ..Self::default()
        }
    }

    /// A recognizer whose `start` always fails.
    pub fn failing() -> Self {
        Self {
            fail_start: true,
            ..Self::default()
        }
    }

    /// Deliver one more result to the active callback, if any.
    pub fn emit(&self, transcript: &str, is_final: bool) {
        let callback = self.callback.lock().ok().and_then(|c| c.clone());
        if let Some(callback) = callback {
            callback(transcript, is_final);
        }
    }

    /// Options passed to the most recent `start`.
    pub fn last_options(&self) -> Option<SpeechRecognitionOptions> {
        self.last_options.lock().ok().and_then(|o| o.clone())
    }
}

impl SpeechRecognizer for ScriptedRecognizer {
    fn is_supported(&self) -> bool {
        true
    }

    fn start(
        &self,
        options: &SpeechRecognitionOptions,
        callback: RecognitionCallback,
    ) -> Result<(), ChatError> {
        if self.fail_start {
            return Err(ChatError::VoiceError("microphone unavailable".to_string()));
        }
        if let Ok(mut last) = self.last_options.lock() {
            *last = Some(options.clone());
        }
        if let Ok(mut slot) = self.callback.lock() {
            *slot = Some(Arc::clone(&callback));
        }
        for (transcript, is_final) in &self.script {
            callback(transcript.as_str(), *is_final);
        }
        Ok(())
    }

    fn stop(&self) {
        if let Ok(mut slot) = self.callback.lock() {
            *slot = None;
        }
    }
}

/// Listening-state wrapper around a [`SpeechRecognizer`].
pub struct SpeechRecognitionService {
    recognizer: Arc<dyn SpeechRecognizer>,
    listening: AtomicBool,
}

impl SpeechRecognitionService {
    pub fn new(recognizer: Arc<dyn SpeechRecognizer>) -> Self {
        Self {
            recognizer,
            listening: AtomicBool::new(false),
        }
    }

    /// Service for a platform with no recognizer.
    pub fn unsupported() -> Self {
        Self::new(Arc::new(UnsupportedRecognizer))
    }

    pub fn check_support(&self) -> bool {
        self.recognizer.is_supported()
    }

    pub fn is_listening(&self) -> bool {
        self.listening.load(Ordering::SeqCst)
    }

    /// Start listening. Returns `false` if recognition is unsupported or the
    /// recognizer refused to start. An active session is stopped first.
    pub fn start_listening(
        &self,
        callback: RecognitionCallback,
        options: SpeechRecognitionOptions,
    ) -> bool {
        if !self.check_support() {
            tracing::error!("Speech recognition is not supported on this platform");
            return false;
        }
        if self.is_listening() {
            self.stop_listening();
        }

        match self.recognizer.start(&options, callback) {
            Ok(()) => {
                self.listening.store(true, Ordering::SeqCst);
                tracing::debug!(language = %options.language, "Speech recognition started");
                true
            }
            Err(e) => {
                tracing::error!(error = %e, "Error starting speech recognition");
                false
            }
        }
    }

    /// Stop listening. Returns `false` if nothing was active.
    pub fn stop_listening(&self) -> bool {
        if self.listening.swap(false, Ordering::SeqCst) {
            self.recognizer.stop();
            true
        } else {
            false
        }
    }

    /// The recognizer finished on its own.
    pub fn on_end(&self) {
        self.listening.store(false, Ordering::SeqCst);
    }

    /// The recognizer reported an error. Logged only.
    pub fn on_error(&self, error: &str) {
        tracing::error!(error, "Speech recognition error");
    }
}

// =============================================================================
// Tests
// =============================================================================
