//! Root page: dashboard entry and OAuth redirect callback target.

use axum::extract::{Query, State};
use axum::http::header::SET_COOKIE;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{AppendHeaders, Html, IntoResponse, Redirect, Response};
use focal_auth::CallbackOutcome;
use serde::Deserialize;

use crate::handlers::drive::store_drive_credentials;
use crate::session::{session_cookie_value, session_id_from_headers};
use crate::state::AppState;

#[derive(Default, Deserialize)]
pub struct IndexQuery {
    /// OAuth authorization code, present on redirect callbacks.
    pub code: Option<String>,
    /// Signed state token, present on redirect callbacks.
    pub state: Option<String>,
    /// Error code Google sends when the user cancels or consent fails.
    pub error: Option<String>,
}

/// `GET /`
///
/// Serves three things from one route, matching the registered redirect
/// URI: the OAuth callback (when `code` and `state` are present), an
/// error notice (when Google redirected with `error`), and otherwise the
/// dashboard shell or the login page.
pub async fn index(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<IndexQuery>,
) -> Response {
    let sid = session_id_from_headers(&headers);

    if let (Some(gate), Some(code), Some(cb_state)) = (&state.gate, &query.code, &query.state) {
        let sid = sid.unwrap_or_else(|| state.sessions.new_session_id());
        return match gate.handle_callback(code, cb_state).await {
            Ok(CallbackOutcome::LoggedIn(info)) => {
                state.sessions.set_user(&sid, info);
                with_cookie(&sid, Redirect::to("/"))
            }
            Ok(CallbackOutcome::DriveConnected {
                email,
                refresh_token,
            }) => match store_drive_credentials(&state, &email, &refresh_token) {
                Ok(()) => with_cookie(&sid, Redirect::to("/")),
                Err(err) => err.into_response(),
            },
            Err(err) => error_page(&format!("Sign-in failed: {err}")),
        };
    }

    if let Some(code) = &query.error {
        return error_page(&format!("Google sign-in returned an error: {code}"));
    }

    let sid = sid.unwrap_or_else(|| state.sessions.new_session_id());
    let session = state.sessions.get(&sid);

    let body = match (&state.gate, &session.user) {
        (Some(gate), None) => login_page(&gate.login_url()),
        (_, user) => dashboard_page(user.as_ref().and_then(|u| u.email.as_deref())),
    };
    with_cookie(&sid, Html(body))
}

fn with_cookie(sid: &str, response: impl IntoResponse) -> Response {
    (
        AppendHeaders([(SET_COOKIE, session_cookie_value(sid))]),
        response,
    )
        .into_response()
}

fn error_page(message: &str) -> Response {
    let body = format!(
        "<!doctype html><html><body><h1>Focal</h1><p>{message}</p>\
         <p><a href=\"/\">Back</a></p></body></html>"
    );
    (StatusCode::FORBIDDEN, Html(body)).into_response()
}

fn login_page(login_url: &str) -> String {
    format!(
        "<!doctype html><html><body><h1>Focal</h1>\
         <p>Sign in to use the dashboard.</p>\
         <p><a href=\"{login_url}\">Sign in with Google</a></p></body></html>"
    )
}

fn dashboard_page(email: Option<&str>) -> String {
    let who = email.map_or(String::new(), |e| format!("<p>Signed in as {e}</p>"));
    format!(
        "<!doctype html><html><body><h1>Focal</h1>{who}\
         <p>The dashboard API is served under <code>/api</code>.</p></body></html>"
    )
}
