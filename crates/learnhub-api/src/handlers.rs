//! Route handlers for all API endpoints.
//!
//! Each handler extracts parameters, calls the relevant service, and returns
//! a JSON response or an [`ApiError`].

use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::{Extension, Json};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use learnhub_chat::{ChatMessage, ChatSession, ReplySource};
use learnhub_core::identity::AuthUser;
use learnhub_courses::{
    Course, CourseFilter, DailyTopic, PreferencesPatch, SortOrder, StatusTab, UserPreferences,
};

use crate::auth::Caller;
use crate::error::ApiError;
use crate::state::AppState;

// =============================================================================
// Query parameter types
// =============================================================================

#[derive(Debug, Default, Deserialize)]
pub struct CourseQuery {
    pub q: Option<String>,
    pub category: Option<String>,
    pub status: Option<String>,
    pub sort: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct LimitParams {
    pub limit: Option<usize>,
}

// =============================================================================
// Request / response types
// =============================================================================

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub uptime_secs: u64,
    pub chat_sessions: usize,
    /// Whether a remote AI backend is configured.
    pub remote_ai: bool,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct MeResponse {
    pub user_id: String,
    /// Profile of the mock signed-in user, when the caller is that user.
    pub user: Option<AuthUser>,
}

#[derive(Debug, Deserialize)]
pub struct ProgressRequest {
    /// Any JSON number; clamped to 0..=100 and rounded.
    pub progress: f64,
}

#[derive(Debug, Deserialize)]
pub struct SendMessageRequest {
    pub content: String,
}

#[derive(Debug, Serialize)]
pub struct SendMessageResponse {
    pub reply: ChatMessage,
    pub source: ReplySource,
}

// =============================================================================
// Health and identity
// =============================================================================

/// GET /health
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_secs: state.start_time.elapsed().as_secs(),
        chat_sessions: state.chat.session_count(),
        remote_ai: state.chat.has_remote(),
    })
}

/// GET /me
pub async fn me(
    State(state): State<AppState>,
    Extension(caller): Extension<Caller>,
) -> Json<MeResponse> {
    let user = state
        .auth
        .current_user()
        .filter(|u| u.uid == caller.user_id);
    Json(MeResponse {
        user_id: caller.user_id,
        user,
    })
}

// =============================================================================
// Courses
// =============================================================================

/// GET /courses?q=&category=&status=&sort=
pub async fn list_courses(
    State(state): State<AppState>,
    query: Result<Query<CourseQuery>, QueryRejection>,
) -> Result<Json<Vec<Course>>, ApiError> {
    let Query(params) = query?;
    let filter = CourseFilter {
        query: params.q,
        category: params.category,
        status: params
            .status
            .as_deref()
            .map(str::parse::<StatusTab>)
            .transpose()?
            .unwrap_or_default(),
        sort: params
            .sort
            .as_deref()
            .map(str::parse::<SortOrder>)
            .transpose()?
            .unwrap_or_default(),
    };
    Ok(Json(state.courses.browse(&filter)))
}

/// GET /courses/{id}
pub async fn get_course(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
) -> Result<Json<Course>, ApiError> {
    let Path(id) = path?;
    state
        .courses
        .course_by_id(&id)
        .map(Json)
        .ok_or_else(|| learnhub_courses::CourseError::NotFound(id).into())
}

/// PUT /courses/{id}/progress
pub async fn update_progress(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
    body: Result<Json<ProgressRequest>, JsonRejection>,
) -> Result<Json<Course>, ApiError> {
    let Path(id) = path?;
    let Json(body) = body?;
    state
        .courses
        .update_course_progress(&id, body.progress)
        .map(Json)
        .ok_or_else(|| learnhub_courses::CourseError::NotFound(id).into())
}

/// GET /courses/recommended?limit=
pub async fn recommended_courses(
    State(state): State<AppState>,
    Extension(caller): Extension<Caller>,
    query: Result<Query<LimitParams>, QueryRejection>,
) -> Result<Json<Vec<Course>>, ApiError> {
    let Query(params) = query?;
    let limit = params
        .limit
        .unwrap_or(state.config.courses.default_recommendation_limit);
    Ok(Json(state.courses.recommended_courses(&caller.user_id, limit)))
}

/// GET /topics/daily?limit=
pub async fn daily_topics(
    State(state): State<AppState>,
    Extension(caller): Extension<Caller>,
    query: Result<Query<LimitParams>, QueryRejection>,
) -> Result<Json<Vec<DailyTopic>>, ApiError> {
    let Query(params) = query?;
    let limit = params.limit.unwrap_or(state.config.courses.default_topic_limit);
    Ok(Json(state.courses.daily_topics(&caller.user_id, limit)))
}

// =============================================================================
// Preferences
// =============================================================================

/// GET /preferences
pub async fn get_preferences(
    State(state): State<AppState>,
    Extension(caller): Extension<Caller>,
) -> Json<UserPreferences> {
    Json(state.courses.user_preferences(&caller.user_id))
}

/// PUT /preferences - shallow merge of the provided fields.
pub async fn update_preferences(
    State(state): State<AppState>,
    Extension(caller): Extension<Caller>,
    body: Result<Json<PreferencesPatch>, JsonRejection>,
) -> Result<Json<UserPreferences>, ApiError> {
    let Json(patch) = body?;
    Ok(Json(state.courses.update_user_preferences(&caller.user_id, patch)))
}

// =============================================================================
// Chat
// =============================================================================

/// POST /chat/session - get or create the caller's session.
pub async fn chat_session(
    State(state): State<AppState>,
    Extension(caller): Extension<Caller>,
) -> Json<ChatSession> {
    Json(state.chat.get_or_create_session(&caller.user_id))
}

/// GET /chat/{session_id}/messages
pub async fn chat_history(
    State(state): State<AppState>,
    path: Result<Path<Uuid>, PathRejection>,
) -> Result<Json<Vec<ChatMessage>>, ApiError> {
    let Path(session_id) = path?;
    Ok(Json(state.chat.get_session_history(session_id)?))
}

/// POST /chat/{session_id}/messages
///
/// An unknown session is reported before input limits are checked.
pub async fn send_chat_message(
    State(state): State<AppState>,
    path: Result<Path<Uuid>, PathRejection>,
    body: Result<Json<SendMessageRequest>, JsonRejection>,
) -> Result<Json<SendMessageResponse>, ApiError> {
    let Path(session_id) = path?;
    let Json(body) = body?;
    if state.chat.session(session_id).is_none() {
        return Err(learnhub_chat::ChatError::SessionNotFound(session_id).into());
    }
    state.chat.validate_message(&body.content)?;

    let (reply, source) = state.chat.send_routed(session_id, &body.content).await?;
    Ok(Json(SendMessageResponse { reply, source }))
}

/// POST /chat/{session_id}/clear - returns the history after clearing.
pub async fn clear_chat(
    State(state): State<AppState>,
    path: Result<Path<Uuid>, PathRejection>,
) -> Result<Json<Vec<ChatMessage>>, ApiError> {
    let Path(session_id) = path?;
    state.chat.clear_session_history(session_id)?;
    tracing::info!(%session_id, "Chat history cleared");
    Ok(Json(state.chat.get_session_history(session_id)?))
}
