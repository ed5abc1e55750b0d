//! Login gate: verifies callback state, exchanges the code, enforces the
//! allow-list, and separates the login flow from the Drive-connect flow.
//!
//! The gate holds no session state itself; callers keep the resulting
//! identity in their per-session context. When OAuth is not configured
//! the gate is simply never constructed and access stays open.

use crate::allowlist::is_allowed;
use crate::errors::AuthError;
use crate::google::{GoogleClient, GoogleOAuthConfig, UserInfo};
use crate::state::{
    DEFAULT_STATE_TTL_SECONDS, PURPOSE_DRIVE_CONNECT, PURPOSE_LOGIN, sign_state, verify_state,
};

/// Scope requested for plain sign-in.
const LOGIN_SCOPE: &str = "openid email profile";

/// Scope requested for Drive connect (read-only Drive on top of sign-in).
const DRIVE_SCOPE: &str = "openid email profile https://www.googleapis.com/auth/drive.readonly";

/// What a verified callback produced.
#[derive(Clone, Debug)]
pub enum CallbackOutcome {
    /// Login flow: the user is authenticated and allowed.
    LoggedIn(UserInfo),
    /// Drive-connect flow: a refresh token to persist for this email.
    DriveConnected {
        /// Normalized account email.
        email: String,
        /// Long-lived Drive refresh token.
        refresh_token: String,
    },
}

/// The OAuth login gate.
pub struct LoginGate {
    cfg: GoogleOAuthConfig,
    secret: String,
    client: GoogleClient,
}

impl LoginGate {
    /// Build a gate from config; the signing secret comes from
    /// `APP_AUTH_SECRET` (falling back to the client secret).
    #[must_use]
    pub fn new(cfg: GoogleOAuthConfig) -> Self {
        let secret = cfg.auth_secret();
        Self {
            cfg,
            secret,
            client: GoogleClient::new(),
        }
    }

    /// Build a gate with an explicit client and secret (tests).
    #[must_use]
    pub fn with_client(cfg: GoogleOAuthConfig, secret: String, client: GoogleClient) -> Self {
        Self {
            cfg,
            secret,
            client,
        }
    }

    /// OAuth config this gate was built from.
    #[must_use]
    pub fn config(&self) -> &GoogleOAuthConfig {
        &self.cfg
    }

    /// Sign-in URL carrying a fresh `login` state token.
    #[must_use]
    pub fn login_url(&self) -> String {
        let state = sign_state(&self.secret, PURPOSE_LOGIN, DEFAULT_STATE_TTL_SECONDS, None);
        self.client
            .build_auth_url(&self.cfg, &state, LOGIN_SCOPE, "online", "select_account")
    }

    /// Drive-connect URL with the state token bound to `email`.
    ///
    /// Offline access plus a consent prompt so Google returns a refresh
    /// token.
    #[must_use]
    pub fn drive_connect_url(&self, email: &str) -> String {
        let state = sign_state(
            &self.secret,
            PURPOSE_DRIVE_CONNECT,
            DEFAULT_STATE_TTL_SECONDS,
            Some(email),
        );
        self.client.build_auth_url(
            &self.cfg,
            &state,
            DRIVE_SCOPE,
            "offline",
            "consent select_account",
        )
    }

    /// Handle the OAuth redirect callback.
    ///
    /// The state token is verified before anything else; a bad signature,
    /// expired token, or unknown purpose stops the flow with
    /// [`AuthError::InvalidState`] and no token exchange happens.
    #[tracing::instrument(skip_all)]
    pub async fn handle_callback(
        &self,
        code: &str,
        state: &str,
    ) -> Result<CallbackOutcome, AuthError> {
        let Some(payload) = verify_state(state, &self.secret) else {
            tracing::warn!("rejected OAuth callback with invalid state token");
            return Err(AuthError::InvalidState);
        };

        match payload.purpose.as_str() {
            PURPOSE_LOGIN => self.complete_login(code).await,
            PURPOSE_DRIVE_CONNECT => self.complete_drive_connect(code, payload.email).await,
            other => {
                tracing::warn!(purpose = other, "rejected OAuth callback with unknown purpose");
                Err(AuthError::InvalidState)
            }
        }
    }

    async fn complete_login(&self, code: &str) -> Result<CallbackOutcome, AuthError> {
        let (info, email) = self.exchange_and_identify(code).await?;
        if !is_allowed(&self.cfg, &email) {
            tracing::warn!(%email, "login denied by allow-list");
            return Err(AuthError::AccessDenied { email });
        }
        tracing::info!(%email, "login completed");
        Ok(CallbackOutcome::LoggedIn(info))
    }

    async fn complete_drive_connect(
        &self,
        code: &str,
        bound_email: Option<String>,
    ) -> Result<CallbackOutcome, AuthError> {
        let token = self.client.exchange_code(&self.cfg, code).await?;
        let access_token = token
            .access_token
            .as_deref()
            .ok_or(AuthError::MissingAccessToken)?;
        let info = self.client.fetch_userinfo(access_token).await?;
        let email = normalized_email(&info)?;

        if let Some(expected) = bound_email {
            if expected.trim().to_lowercase() != email {
                tracing::warn!("drive connect email mismatch");
                return Err(AuthError::EmailMismatch);
            }
        }

        let refresh_token = token.refresh_token.ok_or(AuthError::MissingRefreshToken)?;
        tracing::info!(%email, "drive connect completed");
        Ok(CallbackOutcome::DriveConnected {
            email,
            refresh_token,
        })
    }

    async fn exchange_and_identify(&self, code: &str) -> Result<(UserInfo, String), AuthError> {
        let token = self.client.exchange_code(&self.cfg, code).await?;
        let access_token = token
            .access_token
            .as_deref()
            .ok_or(AuthError::MissingAccessToken)?;
        let info = self.client.fetch_userinfo(access_token).await?;
        let email = normalized_email(&info)?;
        Ok((info, email))
    }
}

fn normalized_email(info: &UserInfo) -> Result<String, AuthError> {
    info.email
        .as_deref()
        .map(|e| e.trim().to_lowercase())
        .filter(|e| !e.is_empty())
        .ok_or(AuthError::MissingEmail)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::google::GoogleEndpoints;
    use assert_matches::assert_matches;
    use wiremock::matchers::{body_string_contains, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const SECRET: &str = "gate-test-secret";

    fn cfg(emails: &[&str], domains: &[&str]) -> GoogleOAuthConfig {
        GoogleOAuthConfig {
            client_id: "client".into(),
            client_secret: "client-secret".into(),
            app_base_url: "https://focal.example".into(),
            allowed_emails: emails.iter().map(|s| (*s).to_string()).collect(),
            allowed_email_domains: domains.iter().map(|s| (*s).to_string()).collect(),
        }
    }

    fn gate_against(server: &MockServer, emails: &[&str], domains: &[&str]) -> LoginGate {
        let endpoints = GoogleEndpoints {
            auth_url: format!("{}/auth", server.uri()),
            token_url: format!("{}/token", server.uri()),
            userinfo_url: format!("{}/userinfo", server.uri()),
        };
        LoginGate::with_client(
            cfg(emails, domains),
            SECRET.to_string(),
            GoogleClient::with_endpoints(endpoints),
        )
    }

    async fn mock_token(server: &MockServer, body: serde_json::Value) {
        Mock::given(method("POST"))
            .and(path("/token"))
            .and(body_string_contains("grant_type=authorization_code"))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .mount(server)
            .await;
    }

    async fn mock_userinfo(server: &MockServer, email: &str) {
        Mock::given(method("GET"))
            .and(path("/userinfo"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({"email": email, "name": "Test User"})),
            )
            .mount(server)
            .await;
    }

    #[tokio::test]
    async fn login_flow_succeeds_for_allowed_email() {
        let server = MockServer::start().await;
        mock_token(&server, serde_json::json!({"access_token": "at-1"})).await;
        mock_userinfo(&server, "Me@Example.com").await;

        let gate = gate_against(&server, &["me@example.com"], &[]);
        let state = sign_state(SECRET, PURPOSE_LOGIN, 60, None);

        let outcome = gate.handle_callback("code-1", &state).await.unwrap();
        assert_matches!(outcome, CallbackOutcome::LoggedIn(info) => {
            assert_eq!(info.email.as_deref(), Some("Me@Example.com"));
        });
    }

    #[tokio::test]
    async fn invalid_state_blocks_token_exchange() {
        let server = MockServer::start().await;
        // No mocks mounted: any HTTP call would fail the test via 404.
        let gate = gate_against(&server, &[], &[]);

        let err = gate.handle_callback("code-1", "garbage").await.unwrap_err();
        assert_matches!(err, AuthError::InvalidState);
        assert!(server.received_requests().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn wrong_purpose_is_invalid_state() {
        let server = MockServer::start().await;
        let gate = gate_against(&server, &[], &[]);
        let state = sign_state(SECRET, "something-else", 60, None);

        let err = gate.handle_callback("code-1", &state).await.unwrap_err();
        assert_matches!(err, AuthError::InvalidState);
    }

    #[tokio::test]
    async fn disallowed_email_is_denied() {
        let server = MockServer::start().await;
        mock_token(&server, serde_json::json!({"access_token": "at-1"})).await;
        mock_userinfo(&server, "intruder@evil.com").await;

        let gate = gate_against(&server, &["me@example.com"], &[]);
        let state = sign_state(SECRET, PURPOSE_LOGIN, 60, None);

        let err = gate.handle_callback("code-1", &state).await.unwrap_err();
        assert_matches!(err, AuthError::AccessDenied { email } => {
            assert_eq!(email, "intruder@evil.com");
        });
    }

    #[tokio::test]
    async fn drive_connect_returns_refresh_token() {
        let server = MockServer::start().await;
        mock_token(
            &server,
            serde_json::json!({"access_token": "at-1", "refresh_token": "rt-1"}),
        )
        .await;
        mock_userinfo(&server, "me@example.com").await;

        let gate = gate_against(&server, &[], &[]);
        let state = sign_state(SECRET, PURPOSE_DRIVE_CONNECT, 60, Some("me@example.com"));

        let outcome = gate.handle_callback("code-1", &state).await.unwrap();
        assert_matches!(outcome, CallbackOutcome::DriveConnected { email, refresh_token } => {
            assert_eq!(email, "me@example.com");
            assert_eq!(refresh_token, "rt-1");
        });
    }

    #[tokio::test]
    async fn drive_connect_rejects_bound_email_mismatch() {
        let server = MockServer::start().await;
        mock_token(
            &server,
            serde_json::json!({"access_token": "at-1", "refresh_token": "rt-1"}),
        )
        .await;
        mock_userinfo(&server, "other@example.com").await;

        let gate = gate_against(&server, &[], &[]);
        let state = sign_state(SECRET, PURPOSE_DRIVE_CONNECT, 60, Some("me@example.com"));

        let err = gate.handle_callback("code-1", &state).await.unwrap_err();
        assert_matches!(err, AuthError::EmailMismatch);
    }

    #[tokio::test]
    async fn drive_connect_without_refresh_token_fails() {
        let server = MockServer::start().await;
        mock_token(&server, serde_json::json!({"access_token": "at-1"})).await;
        mock_userinfo(&server, "me@example.com").await;

        let gate = gate_against(&server, &[], &[]);
        let state = sign_state(SECRET, PURPOSE_DRIVE_CONNECT, 60, Some("me@example.com"));

        let err = gate.handle_callback("code-1", &state).await.unwrap_err();
        assert_matches!(err, AuthError::MissingRefreshToken);
    }

    #[tokio::test]
    async fn token_endpoint_error_is_surfaced() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/token"))
            .respond_with(ResponseTemplate::new(400).set_body_string("bad grant"))
            .mount(&server)
            .await;

        let gate = gate_against(&server, &[], &[]);
        let state = sign_state(SECRET, PURPOSE_LOGIN, 60, None);

        let err = gate.handle_callback("bad-code", &state).await.unwrap_err();
        assert_matches!(err, AuthError::OAuth { status: 400, .. });
    }

    #[test]
    fn login_url_carries_verifiable_state() {
        let gate = LoginGate::with_client(cfg(&[], &[]), SECRET.to_string(), GoogleClient::new());
        let url = gate.login_url();
        let state = url
            .split("state=")
            .nth(1)
            .and_then(|rest| rest.split('&').next())
            .unwrap();
        let payload = verify_state(state, SECRET).unwrap();
        assert_eq!(payload.purpose, PURPOSE_LOGIN);
    }
}
