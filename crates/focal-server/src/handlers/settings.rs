//! Active-root settings endpoints.

use std::path::PathBuf;

use axum::Json;
use axum::extract::State;
use axum::http::HeaderMap;
use focal_settings::{PersistedSettings, save_settings};
use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::state::AppState;

#[derive(Serialize)]
pub struct RootResponse {
    /// Root directory searches currently run under.
    pub root: String,
    /// Whether that root exists as a directory right now.
    pub exists: bool,
}

#[derive(Deserialize)]
pub struct SetRootBody {
    /// New root; blank clears the override back to the configured default.
    #[serde(default)]
    pub root: String,
}

/// `GET /api/root`
pub async fn get_root(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<RootResponse>, ApiError> {
    let _ = state.require_session(&headers)?;
    let root = state.active_root();
    Ok(Json(RootResponse {
        exists: root.is_dir(),
        root: root.display().to_string(),
    }))
}

/// `PUT /api/root`
///
/// Persists the override so it survives restarts; the directory does not
/// have to exist yet.
pub async fn set_root(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(body): Json<SetRootBody>,
) -> Result<Json<RootResponse>, ApiError> {
    let _ = state.require_session(&headers)?;
    let trimmed = body.root.trim();
    let settings = PersistedSettings {
        active_root_dir: (!trimmed.is_empty()).then(|| trimmed.to_string()),
    };
    save_settings(&state.config.data_dir, &settings)?;

    let root: PathBuf = state.active_root();
    Ok(Json(RootResponse {
        exists: root.is_dir(),
        root: root.display().to_string(),
    }))
}
