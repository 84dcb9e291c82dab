//! Error types for the course catalog.

use learnhub_core::error::LearnHubError;

#[derive(Debug, thiserror::Error)]
pub enum CourseError {
    #[error("course not found: {0}")]
    NotFound(String),
    #[error("invalid filter: {0}")]
    InvalidFilter(String),
}

impl From<CourseError> for LearnHubError {
    fn from(err: CourseError) -> Self {
        match err {
            CourseError::NotFound(id) => LearnHubError::NotFound(format!("course {}", id)),
            CourseError::InvalidFilter(msg) => LearnHubError::Config(msg),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_course_error_display() {
        assert_eq!(
            CourseError::NotFound("42".to_string()).to_string(),
            "course not found: 42"
        );
        assert_eq!(
            CourseError::InvalidFilter("status 'done'".to_string()).to_string(),
            "invalid filter: status 'done'"
        );
    }

    #[test]
    fn test_into_learnhub_error() {
        let err: LearnHubError = CourseError::NotFound("7".to_string()).into();
        assert!(matches!(err, LearnHubError::NotFound(_)));
        assert!(err.to_string().contains("course 7"));
    }
}
