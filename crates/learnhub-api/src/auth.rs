//! Caller resolution.
//!
//! There is no real authentication: the caller is named by the `x-user-id`
//! header, and requests without one act as the mock signed-in user.

use axum::extract::{Request, State};
use axum::http::StatusCode;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use axum::Json;

use crate::state::AppState;

pub const USER_ID_HEADER: &str = "x-user-id";

/// The user a request acts on behalf of.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Caller {
    pub user_id: String,
    /// Whether the id came from the header rather than the mock identity.
    pub explicit: bool,
}

/// Middleware that resolves the [`Caller`] and stores it in the request
/// extensions. Returns 400 if the header is not valid UTF-8.
pub async fn resolve_caller(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Response {
    let header = req.headers().get(USER_ID_HEADER).map(|v| v.to_str());

    let caller = match header {
        Some(Ok(value)) if !value.trim().is_empty() => Caller {
            user_id: value.trim().to_string(),
            explicit: true,
        },
        Some(Err(_)) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(serde_json::json!({
                    "error": "bad_request",
                    "message": "Invalid x-user-id header encoding"
                })),
            )
                .into_response();
        }
        _ => Caller {
            user_id: state.auth.session_user_id(),
            explicit: false,
        },
    };

    tracing::trace!(user_id = %caller.user_id, explicit = caller.explicit, "Caller resolved");
    req.extensions_mut().insert(caller);
    next.run(req).await
}
