pub mod config;
pub mod error;
pub mod identity;

pub use config::LearnHubConfig;
pub use error::{LearnHubError, Result};
pub use identity::{AuthUser, MockAuthProvider, UserRole, GUEST_USER_ID};
