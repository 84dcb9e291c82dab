use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::{LearnHubError, Result};

/// Environment variable holding the AI API key.
pub const ENV_AI_API_KEY: &str = "LEARNHUB_AI_API_KEY";
/// Environment variable holding the AI API endpoint.
pub const ENV_AI_API_ENDPOINT: &str = "LEARNHUB_AI_API_ENDPOINT";

/// Top-level configuration for the LearnHub dashboard backend.
///
/// Loaded from `~/.learnhub/config.toml` by default. Each section corresponds
/// to one service.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LearnHubConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub chat: ChatConfig,
    #[serde(default)]
    pub ai: AiConfig,
    #[serde(default)]
    pub courses: CoursesConfig,
}

impl LearnHubConfig {
    /// Load configuration from a TOML file.
    ///
    /// Returns an error if the file cannot be read, parsed, or fails
    /// validation.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: LearnHubConfig = toml::from_str(&content)?;
        config.validate()?;
        info!("Configuration loaded from {}", path.display());
        Ok(config)
    }

    /// Load configuration from a TOML file, falling back to defaults if the
    /// file does not exist or cannot be parsed.
    pub fn load_or_default(path: &Path) -> Self {
        match Self::load(path) {
            Ok(config) => config,
            Err(e) => {
                warn!(
                    "Failed to load config from {}: {}. Using defaults.",
                    path.display(),
                    e
                );
                Self::default()
            }
        }
    }

    /// Save the current configuration to a TOML file.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content =
            toml::to_string_pretty(self).map_err(|e| LearnHubError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        info!("Configuration saved to {}", path.display());
        Ok(())
    }

    /// Reject values the services cannot work with.
    pub fn validate(&self) -> Result<()> {
        if self.chat.max_message_length == 0 {
            return Err(LearnHubError::Config(
                "chat.max_message_length must be greater than 0".to_string(),
            ));
        }
        if !(0.0..=2.0).contains(&self.ai.temperature) {
            return Err(LearnHubError::Config(format!(
                "ai.temperature must be within 0.0..=2.0, got {}",
                self.ai.temperature
            )));
        }
        if self.ai.max_tokens == 0 {
            return Err(LearnHubError::Config(
                "ai.max_tokens must be greater than 0".to_string(),
            ));
        }
        if self.courses.default_recommendation_limit == 0 {
            return Err(LearnHubError::Config(
                "courses.default_recommendation_limit must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }

    /// Apply AI credentials from the process environment.
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides_from(|key| std::env::var(key).ok());
    }

    /// Apply AI credentials from an arbitrary variable lookup.
    ///
    /// Empty values are ignored so an exported-but-blank variable does not
    /// wipe a key set in the config file.
    pub fn apply_overrides_from<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(key) = lookup(ENV_AI_API_KEY).filter(|v| !v.is_empty()) {
            self.ai.api_key = key;
        }
        if let Some(endpoint) = lookup(ENV_AI_API_ENDPOINT).filter(|v| !v.is_empty()) {
            self.ai.api_endpoint = endpoint;
        }
    }
}

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// API server port.
    pub port: u16,
    /// Log level: trace, debug, info, warn, error.
    pub log_level: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            port: 3040,
            log_level: "info".to_string(),
        }
    }
}

/// Chatbot assistant settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ChatConfig {
    /// Whether the assistant accepts messages at all.
    pub enabled: bool,
    /// Maximum user message length in characters.
    pub max_message_length: usize,
    /// Artificial "thinking time" before a rule-based reply, in milliseconds.
    pub response_delay_ms: u64,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            max_message_length: 2000,
            response_delay_ms: 1000,
        }
    }
}

/// Which remote backend answers when AI credentials are configured.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AiBackendKind {
    /// Canned placeholder reply after a fixed delay.
    #[default]
    Simulated,
    /// OpenAI-style chat-completion request over HTTP.
    Http,
}

/// Remote AI assistant settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AiConfig {
    /// Bearer token for the completion endpoint. Empty disables remote calls.
    pub api_key: String,
    /// Chat-completion endpoint URL. Empty disables remote calls.
    pub api_endpoint: String,
    pub backend: AiBackendKind,
    pub model: String,
    pub temperature: f32,
    pub max_tokens: u32,
    /// Number of trailing history messages sent with each request.
    pub history_window: usize,
    /// Delay used by the simulated backend, in milliseconds.
    pub simulated_delay_ms: u64,
    pub request_timeout_secs: u64,
}

impl AiConfig {
    /// Remote calls are attempted only when both credentials are present.
    pub fn has_credentials(&self) -> bool {
        !self.api_key.is_empty() && !self.api_endpoint.is_empty()
    }
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            api_endpoint: String::new(),
            backend: AiBackendKind::Simulated,
            model: "gpt-4".to_string(),
            temperature: 0.7,
            max_tokens: 500,
            history_window: 10,
            simulated_delay_ms: 1000,
            request_timeout_secs: 30,
        }
    }
}

/// Course catalog settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CoursesConfig {
    /// Number of recommendations returned when the caller gives no limit.
    pub default_recommendation_limit: usize,
    /// Number of daily topics returned when the caller gives no limit.
    pub default_topic_limit: usize,
}

impl Default for CoursesConfig {
    fn default() -> Self {
        Self {
            default_recommendation_limit: 3,
            default_topic_limit: 3,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn create_temp_config(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_default_config() {
        let config = LearnHubConfig::default();
        assert_eq!(config.general.port, 3040);
        assert_eq!(config.general.log_level, "info");
        assert!(config.chat.enabled);
        assert_eq!(config.chat.response_delay_ms, 1000);
        assert_eq!(config.ai.model, "gpt-4");
        assert_eq!(config.ai.max_tokens, 500);
        assert_eq!(config.ai.history_window, 10);
        assert_eq!(config.ai.backend, AiBackendKind::Simulated);
        assert!(!config.ai.has_credentials());
        assert_eq!(config.courses.default_recommendation_limit, 3);
    }

    #[test]
    fn test_load_valid_config() {
        let content = r#"
[general]
port = 8080
log_level = "debug"

[chat]
response_delay_ms = 0

[ai]
api_key = "sk-test"
api_endpoint = "https://api.example.com/v1/chat/completions"
backend = "http"
temperature = 0.2
"#;
        let file = create_temp_config(content);
        let config = LearnHubConfig::load(file.path()).unwrap();
        assert_eq!(config.general.port, 8080);
        assert_eq!(config.general.log_level, "debug");
        assert_eq!(config.chat.response_delay_ms, 0);
        assert!(config.chat.enabled);
        assert_eq!(config.ai.backend, AiBackendKind::Http);
        assert!(config.ai.has_credentials());
        assert_eq!(config.ai.model, "gpt-4");
    }

    #[test]
    fn test_load_empty_file_uses_defaults() {
        let file = create_temp_config("");
        let config = LearnHubConfig::load(file.path()).unwrap();
        assert_eq!(config.general.port, 3040);
    }

    #[test]
    fn test_load_invalid_toml_fails() {
        let file = create_temp_config("[general\nport = ");
        let result = LearnHubConfig::load(file.path());
        assert!(matches!(result, Err(LearnHubError::Config(_))));
    }

    #[test]
    fn test_load_missing_file_fails() {
        let result = LearnHubConfig::load(Path::new("/nonexistent/learnhub.toml"));
        assert!(matches!(result, Err(LearnHubError::Io(_))));
    }

    #[test]
    fn test_load_or_default_on_missing_file() {
        let config = LearnHubConfig::load_or_default(Path::new("/nonexistent/learnhub.toml"));
        assert_eq!(config.general.port, 3040);
    }

    #[test]
    fn test_validation_rejects_out_of_range_temperature() {
        let file = create_temp_config("[ai]\ntemperature = 3.5\n");
        let err = LearnHubConfig::load(file.path()).unwrap_err();
        assert!(err.to_string().contains("temperature"));
    }

    #[test]
    fn test_validation_rejects_zero_message_length() {
        let mut config = LearnHubConfig::default();
        config.chat.max_message_length = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_save_and_reload_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        let mut config = LearnHubConfig::default();
        config.general.port = 9999;
        config.ai.backend = AiBackendKind::Http;
        config.save(&path).unwrap();

        let loaded = LearnHubConfig::load(&path).unwrap();
        assert_eq!(loaded.general.port, 9999);
        assert_eq!(loaded.ai.backend, AiBackendKind::Http);
    }

    #[test]
    fn test_overrides_set_credentials() {
        let vars: HashMap<&str, &str> = [
            (ENV_AI_API_KEY, "sk-env"),
            (ENV_AI_API_ENDPOINT, "https://env.example.com"),
        ]
        .into_iter()
        .collect();
        let mut config = LearnHubConfig::default();
        config.apply_overrides_from(|k| vars.get(k).map(|v| v.to_string()));
        assert_eq!(config.ai.api_key, "sk-env");
        assert_eq!(config.ai.api_endpoint, "https://env.example.com");
        assert!(config.ai.has_credentials());
    }

    #[test]
    fn test_blank_override_keeps_file_value() {
        let mut config = LearnHubConfig::default();
        config.ai.api_key = "sk-file".to_string();
        config.apply_overrides_from(|_| Some(String::new()));
        assert_eq!(config.ai.api_key, "sk-file");
    }

    #[test]
    fn test_credentials_need_both_values() {
        let mut ai = AiConfig::default();
        ai.api_key = "sk".to_string();
        assert!(!ai.has_credentials());
        ai.api_endpoint = "https://x".to_string();
        assert!(ai.has_credentials());
    }
}
