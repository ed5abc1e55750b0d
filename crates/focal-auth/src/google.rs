//! Google OAuth collaborator: config, authorize URL, token exchange,
//! userinfo.

use std::time::Duration;

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use serde::Deserialize;

use crate::errors::AuthError;

/// Google authorization endpoint.
pub const GOOGLE_AUTH_URL: &str = "https://accounts.google.com/o/oauth2/v2/auth";

/// Google token endpoint.
pub const GOOGLE_TOKEN_URL: &str = "https://oauth2.googleapis.com/token";

/// Google OpenID userinfo endpoint.
pub const GOOGLE_USERINFO_URL: &str = "https://openidconnect.googleapis.com/v1/userinfo";

/// Socket timeout for token and userinfo calls.
const HTTP_TIMEOUT: Duration = Duration::from_secs(30);

/// Query-string encode set: RFC 3986 unreserved characters pass through.
const QUERY_ENCODE: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// Google OAuth configuration from the environment.
#[derive(Clone, Debug)]
pub struct GoogleOAuthConfig {
    /// OAuth client id.
    pub client_id: String,
    /// OAuth client secret.
    pub client_secret: String,
    /// Public base URL of this app; the redirect URI is its root.
    pub app_base_url: String,
    /// Exact emails permitted to sign in (normalized lowercase).
    pub allowed_emails: Vec<String>,
    /// Email domains permitted to sign in (normalized lowercase).
    pub allowed_email_domains: Vec<String>,
}

impl GoogleOAuthConfig {
    /// Load from `GOOGLE_CLIENT_ID`, `GOOGLE_CLIENT_SECRET`,
    /// `APP_BASE_URL`, `ALLOWED_EMAILS`, `ALLOWED_EMAIL_DOMAINS`.
    ///
    /// Returns `None` when any of the three required variables is absent
    /// or blank — OAuth is then considered unconfigured and the gate is
    /// bypassed.
    #[must_use]
    pub fn from_env() -> Option<Self> {
        let client_id = non_empty_env("GOOGLE_CLIENT_ID")?;
        let client_secret = non_empty_env("GOOGLE_CLIENT_SECRET")?;
        let app_base_url = non_empty_env("APP_BASE_URL")?;
        Some(Self {
            client_id,
            client_secret,
            app_base_url,
            allowed_emails: split_list(&std::env::var("ALLOWED_EMAILS").unwrap_or_default()),
            allowed_email_domains: split_list(
                &std::env::var("ALLOWED_EMAIL_DOMAINS").unwrap_or_default(),
            ),
        })
    }

    /// The registered redirect URI: the app root with a trailing slash.
    #[must_use]
    pub fn redirect_uri(&self) -> String {
        format!("{}/", self.app_base_url.trim_end_matches('/'))
    }

    /// Signing secret for state tokens: `APP_AUTH_SECRET`, falling back
    /// to the OAuth client secret.
    #[must_use]
    pub fn auth_secret(&self) -> String {
        non_empty_env("APP_AUTH_SECRET").unwrap_or_else(|| self.client_secret.clone())
    }
}

fn non_empty_env(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Split a comma-separated env list, trimming and lowercasing entries.
fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_lowercase())
        .filter(|s| !s.is_empty())
        .collect()
}

/// Endpoint URLs, overridable for tests.
#[derive(Clone, Debug)]
pub struct GoogleEndpoints {
    /// Authorization endpoint.
    pub auth_url: String,
    /// Token endpoint.
    pub token_url: String,
    /// Userinfo endpoint.
    pub userinfo_url: String,
}

impl Default for GoogleEndpoints {
    fn default() -> Self {
        Self {
            auth_url: GOOGLE_AUTH_URL.to_string(),
            token_url: GOOGLE_TOKEN_URL.to_string(),
            userinfo_url: GOOGLE_USERINFO_URL.to_string(),
        }
    }
}

/// Token endpoint response.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct TokenResponse {
    /// Short-lived access token.
    #[serde(default)]
    pub access_token: Option<String>,
    /// Long-lived refresh token; only present with offline access.
    #[serde(default)]
    pub refresh_token: Option<String>,
    /// Lifetime of the access token in seconds.
    #[serde(default)]
    pub expires_in: Option<i64>,
}

/// Userinfo endpoint response (subset we use).
#[derive(Clone, Debug, Default, Deserialize, serde::Serialize)]
pub struct UserInfo {
    /// Account email.
    #[serde(default)]
    pub email: Option<String>,
    /// Display name.
    #[serde(default)]
    pub name: Option<String>,
    /// Given name, fallback label when `name` is absent.
    #[serde(default)]
    pub given_name: Option<String>,
}

/// HTTP client for the Google OAuth endpoints.
#[derive(Clone, Debug)]
pub struct GoogleClient {
    endpoints: GoogleEndpoints,
    http: reqwest::Client,
}

impl GoogleClient {
    /// Create a client against the production Google endpoints.
    #[must_use]
    pub fn new() -> Self {
        Self::with_endpoints(GoogleEndpoints::default())
    }

    /// Create a client against explicit endpoints (tests point this at a
    /// local mock server).
    #[must_use]
    pub fn with_endpoints(endpoints: GoogleEndpoints) -> Self {
        Self {
            endpoints,
            http: reqwest::Client::new(),
        }
    }

    /// Build the authorization URL for a flow.
    #[must_use]
    pub fn build_auth_url(
        &self,
        cfg: &GoogleOAuthConfig,
        state: &str,
        scope: &str,
        access_type: &str,
        prompt: &str,
    ) -> String {
        let params: [(&str, &str); 7] = [
            ("client_id", &cfg.client_id),
            ("redirect_uri", &cfg.redirect_uri()),
            ("response_type", "code"),
            ("scope", scope),
            ("state", state),
            ("access_type", access_type),
            ("prompt", prompt),
        ];
        let query: Vec<String> = params
            .iter()
            .map(|(k, v)| format!("{k}={}", utf8_percent_encode(v, QUERY_ENCODE)))
            .collect();
        format!("{}?{}", self.endpoints.auth_url, query.join("&"))
    }

    /// Exchange an authorization code for tokens.
    #[tracing::instrument(skip_all)]
    pub async fn exchange_code(
        &self,
        cfg: &GoogleOAuthConfig,
        code: &str,
    ) -> Result<TokenResponse, AuthError> {
        let form = [
            ("code", code),
            ("client_id", cfg.client_id.as_str()),
            ("client_secret", cfg.client_secret.as_str()),
            ("redirect_uri", &cfg.redirect_uri()),
            ("grant_type", "authorization_code"),
        ];
        let resp = self
            .http
            .post(&self.endpoints.token_url)
            .timeout(HTTP_TIMEOUT)
            .form(&form)
            .send()
            .await?;
        check_status(resp).await?.json().await.map_err(Into::into)
    }

    /// Fetch the userinfo document for an access token.
    #[tracing::instrument(skip_all)]
    pub async fn fetch_userinfo(&self, access_token: &str) -> Result<UserInfo, AuthError> {
        let resp = self
            .http
            .get(&self.endpoints.userinfo_url)
            .timeout(HTTP_TIMEOUT)
            .bearer_auth(access_token)
            .send()
            .await?;
        check_status(resp).await?.json().await.map_err(Into::into)
    }
}

impl Default for GoogleClient {
    fn default() -> Self {
        Self::new()
    }
}

/// Map non-2xx responses to [`AuthError::OAuth`] with the body attached.
async fn check_status(resp: reqwest::Response) -> Result<reqwest::Response, AuthError> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    let message = resp.text().await.unwrap_or_default();
    Err(AuthError::OAuth {
        status: status.as_u16(),
        message,
    })
}
