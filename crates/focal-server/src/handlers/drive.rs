//! Google Drive endpoints.
//!
//! All of these require a configured login gate and a signed-in session:
//! the stored refresh token is keyed by the session's email, and the
//! OAuth client credentials come from the gate's config.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Query, State};
use axum::http::HeaderMap;
use focal_agent::analyze_document;
use focal_auth::LoginGate;
use focal_drive::{
    DEFAULT_MAX_DOWNLOAD_BYTES, FileList, pack_credentials, unpack_credentials,
};
use focal_store::IntegrationKey;
use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::state::AppState;

/// Provider key in the integrations table.
pub const DRIVE_PROVIDER: &str = "google_drive";

const DEFAULT_PAGE_SIZE: u32 = 20;

#[derive(Serialize)]
pub struct ConnectResponse {
    /// Authorization URL to send the browser to.
    pub url: String,
}

#[derive(Serialize)]
pub struct StatusResponse {
    /// Whether a refresh token is stored for this account.
    pub connected: bool,
}

#[derive(Serialize)]
pub struct DisconnectResponse {
    /// Whether stored credentials were actually removed.
    pub disconnected: bool,
}

#[derive(Default, Deserialize)]
pub struct ListFilesQuery {
    /// Drive query expression (`q` parameter), optional.
    #[serde(default)]
    pub q: String,
    /// Page size; defaults to 20.
    pub page_size: Option<u32>,
}

#[derive(Deserialize)]
pub struct AnalyzeBody {
    /// Drive file id.
    pub file_id: String,
    /// Display name, echoed into the prompt.
    pub name: String,
    /// Mime type; decides export vs. direct download.
    pub mime_type: String,
}

#[derive(Serialize)]
pub struct AnalyzeResponse {
    /// Provider that produced the analysis.
    pub provider: String,
    /// Model output, verbatim.
    pub answer: String,
}

/// Session email plus the gate, or the reason Drive is unavailable.
fn drive_context(
    state: &AppState,
    headers: &HeaderMap,
) -> Result<(Arc<LoginGate>, String), ApiError> {
    let (_, session) = state.require_session(headers)?;
    let gate = state
        .gate
        .clone()
        .ok_or_else(|| ApiError::BadRequest("Google OAuth is not configured".into()))?;
    let email = session.email().ok_or(ApiError::Unauthorized)?;
    Ok((gate, email))
}

/// A fresh access token from the stored refresh token.
async fn access_token_for(
    state: &AppState,
    gate: &LoginGate,
    email: &str,
) -> Result<String, ApiError> {
    let key = IntegrationKey::new(email, DRIVE_PROVIDER);
    let data = state
        .store
        .get_integration(&key)?
        .ok_or_else(|| ApiError::BadRequest("Google Drive is not connected".into()))?;
    let refresh_token = unpack_credentials(&data)
        .ok_or_else(|| ApiError::BadRequest("stored Drive credentials are unusable".into()))?;
    let cfg = gate.config();
    let token = state
        .drive
        .refresh_access_token(&cfg.client_id, &cfg.client_secret, &refresh_token)
        .await?;
    Ok(token)
}

/// `GET /api/drive/connect`
pub async fn connect(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<ConnectResponse>, ApiError> {
    let (gate, email) = drive_context(&state, &headers)?;
    Ok(Json(ConnectResponse {
        url: gate.drive_connect_url(&email),
    }))
}

/// `GET /api/drive/status`
pub async fn status(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<StatusResponse>, ApiError> {
    let (_, email) = drive_context(&state, &headers)?;
    let key = IntegrationKey::new(&email, DRIVE_PROVIDER);
    let connected = state
        .store
        .get_integration(&key)?
        .as_deref()
        .and_then(unpack_credentials)
        .is_some();
    Ok(Json(StatusResponse { connected }))
}

/// `POST /api/drive/disconnect`
pub async fn disconnect(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<DisconnectResponse>, ApiError> {
    let (_, email) = drive_context(&state, &headers)?;
    let key = IntegrationKey::new(&email, DRIVE_PROVIDER);
    let removed = state.store.delete_integration(&key)?;
    Ok(Json(DisconnectResponse {
        disconnected: removed > 0,
    }))
}

/// `GET /api/drive/files`
pub async fn list_files(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<ListFilesQuery>,
) -> Result<Json<FileList>, ApiError> {
    let (gate, email) = drive_context(&state, &headers)?;
    let token = access_token_for(&state, &gate, &email).await?;
    let page_size = query.page_size.unwrap_or(DEFAULT_PAGE_SIZE);
    let listing = state.drive.list_files(&token, &query.q, page_size).await?;
    Ok(Json(listing))
}

/// `POST /api/drive/analyze`
pub async fn analyze(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(body): Json<AnalyzeBody>,
) -> Result<Json<AnalyzeResponse>, ApiError> {
    let (gate, email) = drive_context(&state, &headers)?;
    let token = access_token_for(&state, &gate, &email).await?;
    let text = state
        .drive
        .download_text(
            &token,
            &body.file_id,
            &body.mime_type,
            DEFAULT_MAX_DOWNLOAD_BYTES,
        )
        .await?;
    let answer =
        analyze_document(state.provider.as_ref(), &body.name, &body.mime_type, &text).await?;
    Ok(Json(AnalyzeResponse {
        provider: state.provider.name(),
        answer,
    }))
}

/// Persist a refresh token after a completed Drive-connect callback.
pub fn store_drive_credentials(
    state: &AppState,
    email: &str,
    refresh_token: &str,
) -> Result<(), ApiError> {
    let key = IntegrationKey::new(email, DRIVE_PROVIDER);
    state
        .store
        .upsert_integration(&key, &pack_credentials(refresh_token))?;
    Ok(())
}
