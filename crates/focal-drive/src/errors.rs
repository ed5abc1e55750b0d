//! Drive client errors.

use thiserror::Error;

/// Errors from the Drive REST client.
#[derive(Debug, Error)]
pub enum DriveError {
    /// Transport-level failure.
    #[error("drive http error: {0}")]
    Http(#[from] reqwest::Error),

    /// Drive or token endpoint rejected the request.
    #[error("drive api error (status {status}): {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Response body, as returned.
        message: String,
    },

    /// Token refresh succeeded but no access token came back.
    #[error("token refresh response missing access_token")]
    MissingAccessToken,
}
