//! Shared application state.

use std::path::PathBuf;
use std::sync::Arc;

use axum::http::HeaderMap;
use focal_auth::LoginGate;
use focal_drive::DriveClient;
use focal_llm::ChatProvider;
use focal_settings::{Config, load_settings};
use focal_store::Store;

use crate::error::ApiError;
use crate::session::{Session, SessionRegistry, session_id_from_headers};

/// Session id used when the login gate is not configured and the client
/// sent no cookie.
const LOCAL_SESSION_ID: &str = "local";

/// State accessible from every handler.
#[derive(Clone)]
pub struct AppState {
    /// Task/AI/integration store.
    pub store: Store,
    /// Environment-derived paths.
    pub config: Config,
    /// Login gate; `None` means OAuth is unconfigured and access is open.
    pub gate: Option<Arc<LoginGate>>,
    /// Selected chat provider.
    pub provider: Arc<dyn ChatProvider>,
    /// Drive REST client.
    pub drive: DriveClient,
    /// Live sessions.
    pub sessions: Arc<SessionRegistry>,
}

impl AppState {
    /// Assemble the state for a server.
    #[must_use]
    pub fn new(
        store: Store,
        config: Config,
        gate: Option<LoginGate>,
        provider: Arc<dyn ChatProvider>,
    ) -> Self {
        Self {
            store,
            config,
            gate: gate.map(Arc::new),
            provider,
            drive: DriveClient::new(),
            sessions: Arc::new(SessionRegistry::new()),
        }
    }

    /// The root directory searches run under: the persisted override when
    /// one is saved, the configured default otherwise.
    #[must_use]
    pub fn active_root(&self) -> PathBuf {
        load_settings(&self.config.data_dir)
            .active_root_dir
            .map_or_else(|| self.config.root_dir.clone(), PathBuf::from)
    }

    /// Resolve the caller's session, enforcing the login gate.
    ///
    /// With a gate configured, only a session that completed the login
    /// flow passes; without one, everyone shares open access and cookie-
    /// less clients land in a single local session.
    pub fn require_session(&self, headers: &HeaderMap) -> Result<(String, Session), ApiError> {
        let sid = session_id_from_headers(headers);
        if self.gate.is_some() {
            let sid = sid.ok_or(ApiError::Unauthorized)?;
            let session = self.sessions.get(&sid);
            if session.user.is_none() {
                return Err(ApiError::Unauthorized);
            }
            Ok((sid, session))
        } else {
            let sid = sid.unwrap_or_else(|| LOCAL_SESSION_ID.to_string());
            let session = self.sessions.get(&sid);
            Ok((sid, session))
        }
    }
}
