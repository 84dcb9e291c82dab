//! Remote AI backends for the assistant.
//!
//! A backend turns the recent conversation into a single reply. The
//! simulated backend stands in when no real endpoint should be called; the
//! HTTP backend speaks the OpenAI-style chat-completion format.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use learnhub_core::config::{AiBackendKind, AiConfig};
use serde::{Deserialize, Serialize};

use crate::error::ChatError;
use crate::types::{ChatMessage, Sender};

/// System prompt prepended to every completion request.
pub const SYSTEM_PROMPT: &str = "You are an AI learning assistant for an educational platform. Your goal is to help users learn new skills, answer their questions about course content, and provide personalized learning recommendations. Be concise, helpful, and encouraging.";

/// Reply returned by [`SimulatedAiBackend`].
pub const SIMULATED_REPLY: &str = "I'm simulating an AI response since we're not connected to a real API yet. In a production environment, this would be a response from OpenAI, Claude, or another AI model.";

// =============================================================================
// Wire types
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WireMessage {
    pub role: String,
    pub content: String,
}

/// Body of a chat-completion request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompletionRequest {
    pub model: String,
    pub messages: Vec<WireMessage>,
    pub temperature: f32,
    pub max_tokens: u32,
}

impl CompletionRequest {
    /// Build a request from the system prompt plus the trailing
    /// `config.history_window` messages of `history`.
    pub fn from_history(history: &[ChatMessage], config: &AiConfig) -> Self {
        let start = history.len().saturating_sub(config.history_window);
        let mut messages = Vec::with_capacity(history.len() - start + 1);
        messages.push(WireMessage {
            role: "system".to_string(),
            content: SYSTEM_PROMPT.to_string(),
        });
        messages.extend(history[start..].iter().map(|msg| WireMessage {
            role: match msg.sender {
                Sender::User => "user",
                Sender::Bot => "assistant",
            }
            .to_string(),
            content: msg.content.clone(),
        }));

        Self {
            model: config.model.clone(),
            messages,
            temperature: config.temperature,
            max_tokens: config.max_tokens,
        }
    }
}

#[derive(Debug, Deserialize)]
struct CompletionResponse {
    choices: Vec<CompletionChoice>,
}

#[derive(Debug, Deserialize)]
struct CompletionChoice {
    message: WireMessage,
}

// =============================================================================
// Outcome
// =============================================================================

/// Result of trying the remote path for one turn.
#[derive(Debug)]
pub enum RemoteOutcome {
    /// The backend produced a reply.
    Replied(String),
    /// The backend was called and failed; the caller falls back to rules.
    Failed(ChatError),
    /// No credentials are configured, so nothing was attempted.
    NotConfigured,
}

// =============================================================================
// Trait
// =============================================================================

/// A source of AI-generated replies.
#[async_trait]
pub trait AiBackend: Send + Sync {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    /// Produce the assistant's next reply for the given request.
    async fn complete(&self, request: &CompletionRequest) -> Result<String, ChatError>;
}

/// Build the backend selected by `config`, or `None` when credentials are
/// missing.
pub fn backend_from_config(config: &AiConfig) -> Result<Option<Arc<dyn AiBackend>>, ChatError> {
    if !config.has_credentials() {
        return Ok(None);
    }
    let backend: Arc<dyn AiBackend> = match config.backend {
        AiBackendKind::Simulated => Arc::new(SimulatedAiBackend::new(Duration::from_millis(
            config.simulated_delay_ms,
        ))),
        AiBackendKind::Http => Arc::new(HttpAiBackend::new(
            config.api_endpoint.clone(),
            config.api_key.clone(),
            Duration::from_secs(config.request_timeout_secs),
        )?),
    };
    tracing::info!(backend = backend.name(), "Remote AI backend configured");
    Ok(Some(backend))
}

// =============================================================================
// Simulated backend
// =============================================================================

/// Waits a fixed delay and returns a canned placeholder reply.
#[derive(Debug, Clone)]
pub struct SimulatedAiBackend {
    delay: Duration,
}

impl SimulatedAiBackend {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }
}

#[async_trait]
impl AiBackend for SimulatedAiBackend {
    fn name(&self) -> &'static str {
        "simulated"
    }

    async fn complete(&self, _request: &CompletionRequest) -> Result<String, ChatError> {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        Ok(SIMULATED_REPLY.to_string())
    }
}

// =============================================================================
// HTTP backend
// =============================================================================

/// Calls an OpenAI-style chat-completion endpoint.
#[derive(Debug, Clone)]
pub struct HttpAiBackend {
    client: reqwest::Client,
    endpoint: String,
    api_key: String,
}

impl HttpAiBackend {
    pub fn new(endpoint: String, api_key: String, timeout: Duration) -> Result<Self, ChatError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            endpoint,
            api_key,
        })
    }
}

#[async_trait]
impl AiBackend for HttpAiBackend {
    fn name(&self) -> &'static str {
        "http"
    }

    async fn complete(&self, request: &CompletionRequest) -> Result<String, ChatError> {
        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(request)
            .send()
            .await?
            .error_for_status()?;

        let body: CompletionResponse = response.json().await?;
        body.choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .filter(|content| !content.trim().is_empty())
            .ok_or_else(|| ChatError::Remote("completion contained no reply".to_string()))
    }
}

// =============================================================================
// Tests
// =============================================================================
