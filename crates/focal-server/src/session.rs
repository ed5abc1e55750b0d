//! Per-session context.
//!
//! Each browser session gets its own context keyed by an opaque cookie:
//! the signed-in user (when the login gate is configured) and the hits
//! from its most recent file search, which feed the insights prompt.
//! Nothing in here is ever shared across sessions, and logout drops the
//! whole context.

use std::collections::HashMap;

use axum::http::HeaderMap;
use axum::http::header::COOKIE;
use focal_auth::UserInfo;
use focal_core::ids;
use focal_search::FileHit;
use parking_lot::RwLock;

/// Session cookie name.
pub const SESSION_COOKIE: &str = "focal_session";

/// State carried per browser session.
#[derive(Clone, Debug, Default)]
pub struct Session {
    /// The signed-in user, once the login flow completed.
    pub user: Option<UserInfo>,
    /// Hits from this session's most recent search.
    pub last_hits: Vec<FileHit>,
}

impl Session {
    /// Normalized email of the signed-in user, if any.
    #[must_use]
    pub fn email(&self) -> Option<String> {
        self.user
            .as_ref()
            .and_then(|u| u.email.as_deref())
            .map(|e| e.trim().to_lowercase())
            .filter(|e| !e.is_empty())
    }
}

/// In-memory registry of live sessions.
#[derive(Debug, Default)]
pub struct SessionRegistry {
    sessions: RwLock<HashMap<String, Session>>,
}

impl SessionRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Mint a fresh session id.
    #[must_use]
    pub fn new_session_id(&self) -> String {
        ids::new_id()
    }

    /// Snapshot of the session for an id; a default for unknown ids.
    #[must_use]
    pub fn get(&self, session_id: &str) -> Session {
        self.sessions
            .read()
            .get(session_id)
            .cloned()
            .unwrap_or_default()
    }

    /// Record a completed login.
    pub fn set_user(&self, session_id: &str, user: UserInfo) {
        let mut sessions = self.sessions.write();
        sessions.entry(session_id.to_string()).or_default().user = Some(user);
    }

    /// Remember the hits from the latest search.
    pub fn set_last_hits(&self, session_id: &str, hits: Vec<FileHit>) {
        let mut sessions = self.sessions.write();
        sessions
            .entry(session_id.to_string())
            .or_default()
            .last_hits = hits;
    }

    /// Drop the whole session context (logout).
    pub fn clear(&self, session_id: &str) {
        let _ = self.sessions.write().remove(session_id);
    }
}

/// Session id from the request's `Cookie` header, if present.
#[must_use]
pub fn session_id_from_headers(headers: &HeaderMap) -> Option<String> {
    let raw = headers.get(COOKIE)?.to_str().ok()?;
    raw.split(';').find_map(|pair| {
        let (name, value) = pair.trim().split_once('=')?;
        (name == SESSION_COOKIE && !value.is_empty()).then(|| value.to_string())
    })
}

/// `Set-Cookie` value establishing the session cookie.
#[must_use]
pub fn session_cookie_value(session_id: &str) -> String {
    format!("{SESSION_COOKIE}={session_id}; Path=/; HttpOnly; SameSite=Lax")
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;
    use std::path::PathBuf;

    #[test]
    fn sessions_are_isolated() {
        let registry = SessionRegistry::new();
        let a = registry.new_session_id();
        let b = registry.new_session_id();
        assert_ne!(a, b);

        registry.set_last_hits(
            &a,
            vec![FileHit {
                path: PathBuf::from("/tmp/a.txt"),
                line_no: 1,
                line: "x".into(),
            }],
        );
        assert_eq!(registry.get(&a).last_hits.len(), 1);
        assert!(registry.get(&b).last_hits.is_empty());
    }

    #[test]
    fn clear_drops_user_and_hits() {
        let registry = SessionRegistry::new();
        let sid = registry.new_session_id();
        registry.set_user(
            &sid,
            UserInfo {
                email: Some("User@Example.com ".into()),
                ..UserInfo::default()
            },
        );
        assert_eq!(registry.get(&sid).email().as_deref(), Some("user@example.com"));

        registry.clear(&sid);
        let after = registry.get(&sid);
        assert!(after.user.is_none());
        assert!(after.last_hits.is_empty());
    }

    #[test]
    fn cookie_parsing_finds_session_among_others() {
        let mut headers = HeaderMap::new();
        let _ = headers.insert(
            COOKIE,
            HeaderValue::from_static("theme=dark; focal_session=abc123; lang=en"),
        );
        assert_eq!(session_id_from_headers(&headers).as_deref(), Some("abc123"));

        let mut empty = HeaderMap::new();
        let _ = empty.insert(COOKIE, HeaderValue::from_static("theme=dark"));
        assert_eq!(session_id_from_headers(&empty), None);
        assert_eq!(session_id_from_headers(&HeaderMap::new()), None);
    }
}
