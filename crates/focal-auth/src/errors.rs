//! Auth errors.

/// Errors from the OAuth gate.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// HTTP transport failure talking to the provider.
    #[error("auth request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Provider returned a non-success status.
    #[error("OAuth endpoint error (status {status}): {message}")]
    OAuth {
        /// HTTP status code.
        status: u16,
        /// Response body, best effort.
        message: String,
    },

    /// The state token failed verification (signature, format, or expiry)
    /// or carried an unexpected purpose.
    #[error("invalid OAuth state")]
    InvalidState,

    /// The account is not on the allow-list.
    #[error("access denied: {email} is not allowed")]
    AccessDenied {
        /// Email that was rejected.
        email: String,
    },

    /// Token response was missing the access token.
    #[error("missing access_token in token response")]
    MissingAccessToken,

    /// Token response was missing the refresh token (Drive connect needs
    /// offline access granted).
    #[error("missing refresh_token in token response; grant offline access and retry")]
    MissingRefreshToken,

    /// Userinfo response carried no email.
    #[error("missing email in userinfo response")]
    MissingEmail,

    /// The Drive-connect state was bound to a different account.
    #[error("connect flow was started for a different account")]
    EmailMismatch,
}
