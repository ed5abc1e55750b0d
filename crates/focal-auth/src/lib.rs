//! # focal-auth
//!
//! Authentication for the dashboard, in three layers:
//!
//! - [`state`]: stateless signed OAuth state tokens — HMAC-SHA256 over a
//!   base64url payload carrying a nonce, expiry, purpose tag, and an
//!   optional bound email. No server-side session storage; survives
//!   redirect flows behind proxies that drop sessions.
//! - [`google`]: the external Google OAuth collaborator — authorize URL
//!   builder, code-for-token exchange, userinfo fetch.
//! - [`gate`]: the login gate consuming both — verifies callback state,
//!   exchanges the code, enforces the allow-list, and distinguishes the
//!   login flow from the Drive-connect flow.
//!
//! State/signature failures are security-relevant rejections: the gate
//! refuses to proceed to token exchange and never retries silently.

#![deny(unsafe_code)]

pub mod allowlist;
pub mod errors;
pub mod gate;
pub mod google;
pub mod state;

pub use allowlist::is_allowed;
pub use errors::AuthError;
pub use gate::{CallbackOutcome, LoginGate};
pub use google::{GoogleClient, GoogleEndpoints, GoogleOAuthConfig, TokenResponse, UserInfo};
pub use state::{
    DEFAULT_STATE_TTL_SECONDS, PURPOSE_DRIVE_CONNECT, PURPOSE_LOGIN, StatePayload, sign_state,
    verify_state,
};
