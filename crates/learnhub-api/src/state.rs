//! Application state shared across all route handlers.

use std::sync::Arc;
use std::time::Instant;

use learnhub_chat::ChatbotService;
use learnhub_core::config::LearnHubConfig;
use learnhub_core::identity::MockAuthProvider;
use learnhub_courses::CourseService;

/// Shared application state.
///
/// Cloned into every handler; the services themselves are behind `Arc`.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<LearnHubConfig>,
    pub chat: Arc<ChatbotService>,
    pub courses: Arc<CourseService>,
    pub auth: MockAuthProvider,
    /// Server start time for uptime calculation.
    pub start_time: Instant,
}

impl AppState {
    pub fn new(config: LearnHubConfig, chat: ChatbotService, courses: CourseService) -> Self {
        Self {
            config: Arc::new(config),
            chat: Arc::new(chat),
            courses: Arc::new(courses),
            auth: MockAuthProvider::new(),
            start_time: Instant::now(),
        }
    }
}
