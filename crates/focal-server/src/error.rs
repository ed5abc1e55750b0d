//! API error type.
//!
//! Every handler failure renders as JSON `{"error": …}` with a status
//! that reflects whose fault it was; nothing here aborts the process.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

/// Errors surfaced by the HTTP handlers.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request itself was unusable.
    #[error("{0}")]
    BadRequest(String),

    /// No authenticated session and the login gate is configured.
    #[error("not signed in")]
    Unauthorized,

    /// The account is not on the allow-list.
    #[error("access denied for {email}")]
    Forbidden {
        /// Email that was refused.
        email: String,
    },

    /// The referenced resource does not exist.
    #[error("{0} not found")]
    NotFound(&'static str),

    /// Database failure.
    #[error(transparent)]
    Store(#[from] focal_store::StoreError),

    /// Search failure other than a bad pattern.
    #[error(transparent)]
    Search(focal_search::SearchError),

    /// OAuth flow failure.
    #[error(transparent)]
    Auth(focal_auth::AuthError),

    /// Drive API failure.
    #[error(transparent)]
    Drive(#[from] focal_drive::DriveError),

    /// LLM provider failure.
    #[error(transparent)]
    Provider(#[from] focal_llm::ProviderError),

    /// Settings persistence failure.
    #[error(transparent)]
    Settings(#[from] focal_settings::SettingsError),
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) | Self::Search(focal_search::SearchError::InvalidPattern(_)) => {
                StatusCode::BAD_REQUEST
            }
            Self::Unauthorized => StatusCode::UNAUTHORIZED,
            Self::Forbidden { .. } => StatusCode::FORBIDDEN,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Auth(focal_auth::AuthError::InvalidState) => StatusCode::BAD_REQUEST,
            Self::Auth(focal_auth::AuthError::AccessDenied { .. }) => StatusCode::FORBIDDEN,
            Self::Store(_) | Self::Settings(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Auth(_) | Self::Drive(_) | Self::Provider(_) => StatusCode::BAD_GATEWAY,
        }
    }
}

impl From<focal_search::SearchError> for ApiError {
    fn from(err: focal_search::SearchError) -> Self {
        Self::Search(err)
    }
}

impl From<focal_auth::AuthError> for ApiError {
    fn from(err: focal_auth::AuthError) -> Self {
        match err {
            focal_auth::AuthError::AccessDenied { email } => Self::Forbidden { email },
            other => Self::Auth(other),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        } else {
            tracing::debug!(error = %self, status = status.as_u16(), "request rejected");
        }
        let body = Json(serde_json::json!({ "error": self.to_string() }));
        (status, body).into_response()
    }
}
