//! LearnHub API crate - axum HTTP server and route handlers.
//!
//! Exposes the chat assistant, the course catalog, learner preferences
//! and the mock identity over a small JSON API for the dashboard.

pub mod auth;
pub mod error;
pub mod handlers;
pub mod routes;
pub mod state;

pub use error::ApiError;
pub use routes::{create_router, start_server};
pub use state::AppState;
