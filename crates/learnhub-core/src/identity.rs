//! Mock signed-in identity.
//!
//! There is no real authentication backend: every session resolves to the
//! same fixed student until one is wired in.

use serde::{Deserialize, Serialize};

/// User id used for chat sessions when nobody is signed in.
pub const GUEST_USER_ID: &str = "guest";

/// Role attached to a signed-in user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Student,
    Instructor,
    Admin,
}

/// A signed-in user as seen by the dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthUser {
    pub uid: String,
    pub display_name: Option<String>,
    pub email: Option<String>,
    pub photo_url: Option<String>,
    pub role: UserRole,
}

/// Identity source that always reports the same student.
#[derive(Debug, Clone, Default)]
pub struct MockAuthProvider;

impl MockAuthProvider {
    pub fn new() -> Self {
        Self
    }

    /// The currently signed-in user.
    pub fn current_user(&self) -> Option<AuthUser> {
        Some(AuthUser {
            uid: "mock-user-id".to_string(),
            display_name: Some("Alex Johnson".to_string()),
            email: Some("alex@example.com".to_string()),
            photo_url: None,
            role: UserRole::Student,
        })
    }

    /// Chat session key for the current user, or the guest key.
    pub fn session_user_id(&self) -> String {
        self.current_user()
            .map(|u| u.uid)
            .unwrap_or_else(|| GUEST_USER_ID.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_user_is_student() {
        let user = MockAuthProvider::new().current_user().unwrap();
        assert_eq!(user.uid, "mock-user-id");
        assert_eq!(user.display_name.as_deref(), Some("Alex Johnson"));
        assert_eq!(user.role, UserRole::Student);
        assert!(user.photo_url.is_none());
    }

    #[test]
    fn test_session_user_id_uses_uid() {
        assert_eq!(MockAuthProvider::new().session_user_id(), "mock-user-id");
    }

    #[test]
    fn test_role_serializes_lowercase() {
        let json = serde_json::to_string(&UserRole::Instructor).unwrap();
        assert_eq!(json, "\"instructor\"");
    }
}
