//! Logout endpoint.

use axum::Json;
use axum::extract::State;
use axum::http::HeaderMap;
use serde::Serialize;

use crate::error::ApiError;
use crate::session::session_id_from_headers;
use crate::state::AppState;

#[derive(Serialize)]
pub struct LogoutResponse {
    /// Always true; logout of an unknown session is still a logout.
    pub logged_out: bool,
}

/// `POST /api/logout`
///
/// Drops the whole session context (identity and remembered search
/// hits). Deliberately does not require a signed-in session.
pub async fn logout(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<LogoutResponse>, ApiError> {
    if let Some(sid) = session_id_from_headers(&headers) {
        state.sessions.clear(&sid);
    }
    Ok(Json(LogoutResponse { logged_out: true }))
}
