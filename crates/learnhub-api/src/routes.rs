//! Router setup with all API routes and middleware.

use axum::extract::DefaultBodyLimit;
use axum::http::{header, HeaderName, HeaderValue, Method};
use axum::routing::{get, post, put};
use axum::Router;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;

use learnhub_core::config::LearnHubConfig;
use learnhub_core::error::LearnHubError;

use crate::auth::{self, USER_ID_HEADER};
use crate::handlers;
use crate::state::AppState;

/// Create the axum Router with all routes and middleware.
pub fn create_router(state: AppState) -> Router {
    // Dashboard origins: the API port and the dev server on port + 1.
    let port = state.config.general.port;
    let origins: Vec<HeaderValue> = [port, port.saturating_add(1)]
        .iter()
        .flat_map(|p| [format!("http://127.0.0.1:{}", p), format!("http://localhost:{}", p)])
        .filter_map(|origin| origin.parse::<HeaderValue>().ok())
        .collect();
    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::OPTIONS])
        .allow_headers([
            header::CONTENT_TYPE,
            header::ACCEPT,
            HeaderName::from_static(USER_ID_HEADER),
        ]);

    let public_routes = Router::new().route("/health", get(handlers::health));

    let caller_routes = Router::new()
        .route("/me", get(handlers::me))
        .route("/courses", get(handlers::list_courses))
        .route("/courses/recommended", get(handlers::recommended_courses))
        .route("/courses/{id}", get(handlers::get_course))
        .route("/courses/{id}/progress", put(handlers::update_progress))
        .route("/topics/daily", get(handlers::daily_topics))
        .route(
            "/preferences",
            get(handlers::get_preferences).put(handlers::update_preferences),
        )
        .route("/chat/session", post(handlers::chat_session))
        .route(
            "/chat/{session_id}/messages",
            get(handlers::chat_history).post(handlers::send_chat_message),
        )
        .route("/chat/{session_id}/clear", post(handlers::clear_chat))
        .route_layer(axum::middleware::from_fn_with_state(
            state.clone(),
            auth::resolve_caller,
        ));

    public_routes
        .merge(caller_routes)
        .layer(DefaultBodyLimit::max(64 * 1024))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Start the HTTP server on 127.0.0.1 at the configured port.
pub async fn start_server(config: &LearnHubConfig, state: AppState) -> Result<(), LearnHubError> {
    let addr = format!("127.0.0.1:{}", config.general.port);
    let router = create_router(state);

    tracing::info!("Starting API server on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| LearnHubError::Api(format!("Failed to bind: {}", e)))?;

    axum::serve(listener, router)
        .await
        .map_err(|e| LearnHubError::Api(format!("Server error: {}", e)))?;

    Ok(())
}
