use thiserror::Error;

/// Top-level error type for LearnHub.
///
/// Subsystem crates define their own error types and implement
/// `From<LearnHubError>` (or the reverse) so that `?` works across crate
/// boundaries.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum LearnHubError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("API error: {0}")]
    Api(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<toml::de::Error> for LearnHubError {
    fn from(err: toml::de::Error) -> Self {
        LearnHubError::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for LearnHubError {
    fn from(err: toml::ser::Error) -> Self {
        LearnHubError::Config(err.to_string())
    }
}

impl From<serde_json::Error> for LearnHubError {
    fn from(err: serde_json::Error) -> Self {
        LearnHubError::Serialization(err.to_string())
    }
}

/// A specialized `Result` type for LearnHub operations.
pub type Result<T> = std::result::Result<T, LearnHubError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = LearnHubError::Config("missing field".to_string());
        assert_eq!(err.to_string(), "Configuration error: missing field");

        let err = LearnHubError::NotFound("course 42".to_string());
        assert_eq!(err.to_string(), "Not found: course 42");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: LearnHubError = io_err.into();
        assert!(matches!(err, LearnHubError::Io(_)));
        assert!(err.to_string().contains("file not found"));
    }

    #[test]
    fn test_toml_error_conversion() {
        let toml_err = toml::from_str::<toml::Value>("not = [valid").unwrap_err();
        let err: LearnHubError = toml_err.into();
        assert!(matches!(err, LearnHubError::Config(_)));
    }

    #[test]
    fn test_serde_json_error_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("{broken").unwrap_err();
        let err: LearnHubError = json_err.into();
        assert!(matches!(err, LearnHubError::Serialization(_)));
    }
}
