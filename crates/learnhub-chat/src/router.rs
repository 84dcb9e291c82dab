//! Message router: decides the assistant's reply for one turn.
//!
//! The remote backend is tried first when configured; any failure is logged
//! and the keyword rules answer instead. The rule path never fails.

use std::sync::Arc;
use std::time::Duration;

use learnhub_core::config::{AiConfig, LearnHubConfig};
use serde::Serialize;

use crate::error::ChatError;
use crate::intent::{pick_default, Intent};
use crate::remote::{backend_from_config, AiBackend, CompletionRequest, RemoteOutcome};
use crate::types::ChatMessage;

/// Where a reply came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ReplySource {
    /// The remote AI backend answered.
    Remote,
    /// Keyword rules answered; `intent` is `None` for a default reply.
    RuleBased { intent: Option<Intent> },
}

/// A reply together with its provenance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RoutedReply {
    pub content: String,
    pub source: ReplySource,
}

/// Two-path reply generator.
pub struct MessageRouter {
    backend: Option<Arc<dyn AiBackend>>,
    ai_config: AiConfig,
    rule_delay: Duration,
}

impl MessageRouter {
    pub fn new(
        backend: Option<Arc<dyn AiBackend>>,
        ai_config: AiConfig,
        rule_delay: Duration,
    ) -> Self {
        Self {
            backend,
            ai_config,
            rule_delay,
        }
    }

    /// Router with no remote backend.
    pub fn rule_based(rule_delay: Duration) -> Self {
        Self::new(None, AiConfig::default(), rule_delay)
    }

    /// Build the router described by the application config.
    pub fn from_config(config: &LearnHubConfig) -> Result<Self, ChatError> {
        let backend = backend_from_config(&config.ai)?;
        Ok(Self::new(
            backend,
            config.ai.clone(),
            Duration::from_millis(config.chat.response_delay_ms),
        ))
    }

    pub fn has_remote(&self) -> bool {
        self.backend.is_some()
    }

    /// Compute the reply to `input`, given the history that already ends
    /// with it.
    pub async fn route(&self, input: &str, history: &[ChatMessage]) -> RoutedReply {
        match self.try_remote(history).await {
            RemoteOutcome::Replied(content) => {
                return RoutedReply {
                    content,
                    source: ReplySource::Remote,
                }
            }
            RemoteOutcome::Failed(e) => {
                tracing::warn!(error = %e, "Remote AI call failed; using rule-based reply");
            }
            RemoteOutcome::NotConfigured => {}
        }

        if !self.rule_delay.is_zero() {
            tokio::time::sleep(self.rule_delay).await;
        }
        Self::rule_based_reply(input)
    }

    /// Single attempt at the remote backend. No retries.
    pub async fn try_remote(&self, history: &[ChatMessage]) -> RemoteOutcome {
        let Some(backend) = &self.backend else {
            return RemoteOutcome::NotConfigured;
        };
        let request = CompletionRequest::from_history(history, &self.ai_config);
        match backend.complete(&request).await {
            Ok(content) => {
                tracing::debug!(backend = backend.name(), "Remote AI replied");
                RemoteOutcome::Replied(content)
            }
            Err(e) => RemoteOutcome::Failed(e),
        }
    }

    /// Keyword-rule reply without any artificial delay.
    pub fn rule_based_reply(input: &str) -> RoutedReply {
        let intent = Intent::classify(input);
        let content = match intent {
            Some(intent) => intent.response(),
            None => pick_default(&mut rand::rng()),
        };
        RoutedReply {
            content: content.to_string(),
            source: ReplySource::RuleBased { intent },
        }
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::intent::DEFAULT_RESPONSES;
    use crate::remote::{SimulatedAiBackend, SIMULATED_REPLY};
    use async_trait::async_trait;

    struct FailingBackend;

    #[async_trait]
    impl AiBackend for FailingBackend {
        fn name(&self) -> &'static str {
            "failing"
        }

        async fn complete(&self, _request: &CompletionRequest) -> Result<String, ChatError> {
            Err(ChatError::Remote("service unavailable".to_string()))
        }
    }

    fn history_for(input: &str) -> Vec<ChatMessage> {
        vec![ChatMessage::greeting(), ChatMessage::user(input)]
    }

    #[tokio::test]
    async fn test_rule_based_intent_reply() {
        let router = MessageRouter::rule_based(Duration::ZERO);
        let reply = router.route("thanks!", &history_for("thanks!")).await;
        assert_eq!(reply.content, Intent::Gratitude.response());
        assert_eq!(
            reply.source,
            ReplySource::RuleBased {
                intent: Some(Intent::Gratitude)
            }
        );
    }

    #[tokio::test]
    async fn test_rule_based_default_reply() {
        let router = MessageRouter::rule_based(Duration::ZERO);
        let reply = router.route("zzz", &history_for("zzz")).await;
        assert!(DEFAULT_RESPONSES.contains(&reply.content.as_str()));
        assert_eq!(reply.source, ReplySource::RuleBased { intent: None });
    }

    #[tokio::test]
    async fn test_remote_reply_used_when_configured() {
        let backend: Arc<dyn AiBackend> = Arc::new(SimulatedAiBackend::new(Duration::ZERO));
        let router = MessageRouter::new(Some(backend), AiConfig::default(), Duration::ZERO);
        assert!(router.has_remote());
        let reply = router.route("hello", &history_for("hello")).await;
        assert_eq!(reply.content, SIMULATED_REPLY);
        assert_eq!(reply.source, ReplySource::Remote);
    }

    #[tokio::test]
    async fn test_remote_failure_falls_back_to_rules() {
        let backend: Arc<dyn AiBackend> = Arc::new(FailingBackend);
        let router = MessageRouter::new(Some(backend), AiConfig::default(), Duration::ZERO);
        let reply = router.route("hello", &history_for("hello")).await;
        assert_eq!(reply.content, Intent::Greeting.response());
        assert!(matches!(reply.source, ReplySource::RuleBased { .. }));
    }

    #[tokio::test]
    async fn test_try_remote_reports_outcome() {
        let router = MessageRouter::rule_based(Duration::ZERO);
        assert!(matches!(
            router.try_remote(&history_for("x")).await,
            RemoteOutcome::NotConfigured
        ));

        let backend: Arc<dyn AiBackend> = Arc::new(FailingBackend);
        let router = MessageRouter::new(Some(backend), AiConfig::default(), Duration::ZERO);
        assert!(matches!(
            router.try_remote(&history_for("x")).await,
            RemoteOutcome::Failed(ChatError::Remote(_))
        ));
    }

    #[tokio::test]
    async fn test_rule_delay_is_applied() {
        let router = MessageRouter::rule_based(Duration::from_millis(50));
        let start = std::time::Instant::now();
        router.route("hi", &history_for("hi")).await;
        assert!(start.elapsed() >= Duration::from_millis(50));
    }

    #[test]
    fn test_from_config_without_credentials_has_no_remote() {
        let router = MessageRouter::from_config(&LearnHubConfig::default()).unwrap();
        assert!(!router.has_remote());
    }

    #[test]
    fn test_reply_source_serialization() {
        let json = serde_json::to_value(ReplySource::RuleBased {
            intent: Some(Intent::LearningPath),
        })
        .unwrap();
        assert_eq!(json["kind"], "rule_based");
        assert_eq!(json["intent"], "learning_path");

        let json = serde_json::to_value(ReplySource::Remote).unwrap();
        assert_eq!(json["kind"], "remote");
    }
}
