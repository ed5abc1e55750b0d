//! File search, stats, and snippet endpoints.

use std::path::PathBuf;

use axum::Json;
use axum::extract::{Query, State};
use axum::http::HeaderMap;
use focal_search::snippet::DEFAULT_RADIUS;
use focal_search::walk::DEFAULT_MAX_FILES;
use focal_search::{FileHit, SearchOptions, file_stats, read_snippet, search_files};
use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::state::AppState;

#[derive(Deserialize)]
pub struct SearchBody {
    /// Query text: a substring, or a pattern when `regex` is set.
    pub query: String,
    /// Treat the query as a regular expression.
    #[serde(default)]
    pub regex: bool,
    /// Match case-sensitively.
    #[serde(default)]
    pub case_sensitive: bool,
    /// Cap on returned hits.
    pub max_hits: Option<usize>,
}

#[derive(Serialize)]
pub struct SearchResponse {
    /// Root the search ran under.
    pub root: String,
    /// Matching lines, in walk order.
    pub hits: Vec<FileHit>,
}

#[derive(Serialize)]
pub struct StatsResponse {
    /// Root the stats were collected under.
    pub root: String,
    /// (extension, file count), most common first.
    pub extensions: Vec<(String, usize)>,
}

#[derive(Deserialize)]
pub struct SnippetQuery {
    /// File path, as returned in a hit.
    pub path: PathBuf,
    /// Line the snippet centers on.
    pub line: usize,
    /// Context lines either side.
    pub radius: Option<usize>,
}

#[derive(Serialize)]
pub struct SnippetResponse {
    /// Rendered snippet; empty when the file is unreadable.
    pub snippet: String,
}

/// `POST /api/search`
///
/// Runs the search under the active root and remembers the hits in the
/// caller's session for later insights requests.
pub async fn search(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(body): Json<SearchBody>,
) -> Result<Json<SearchResponse>, ApiError> {
    let (sid, _) = state.require_session(&headers)?;
    let root = state.active_root();
    let options = SearchOptions {
        regex: body.regex,
        case_sensitive: body.case_sensitive,
        max_hits: body.max_hits.unwrap_or(SearchOptions::default().max_hits),
        ..SearchOptions::default()
    };
    let hits = search_files(&root, &body.query, &options)?;
    state.sessions.set_last_hits(&sid, hits.clone());
    Ok(Json(SearchResponse {
        root: root.display().to_string(),
        hits,
    }))
}

/// `GET /api/stats`
pub async fn stats(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<StatsResponse>, ApiError> {
    let _ = state.require_session(&headers)?;
    let root = state.active_root();
    let extensions = file_stats(&root, DEFAULT_MAX_FILES);
    Ok(Json(StatsResponse {
        root: root.display().to_string(),
        extensions,
    }))
}

/// `GET /api/snippet`
///
/// Only paths under the active root are served. Both sides of the check
/// are canonicalized first, so `..` components and symlinks cannot walk
/// the request out of the root; a path that does not resolve is rejected
/// the same way.
pub async fn snippet(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<SnippetQuery>,
) -> Result<Json<SnippetResponse>, ApiError> {
    let _ = state.require_session(&headers)?;
    let root = state
        .active_root()
        .canonicalize()
        .map_err(|_| ApiError::BadRequest("active root is not readable".into()))?;
    let outside = || ApiError::BadRequest("path is outside the active root".into());
    let path = query.path.canonicalize().map_err(|_| outside())?;
    if !path.starts_with(&root) {
        return Err(outside());
    }
    let radius = query.radius.unwrap_or(DEFAULT_RADIUS);
    let snippet = read_snippet(&path, query.line, radius);
    Ok(Json(SnippetResponse { snippet }))
}
