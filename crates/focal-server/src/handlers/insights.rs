//! Insights endpoint: tasks + last search hits through the provider.

use axum::Json;
use axum::extract::State;
use axum::http::HeaderMap;
use focal_agent::{InsightsInput, generate_insights};
use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::state::AppState;

#[derive(Default, Deserialize)]
pub struct InsightsBody {
    /// Free-form question; blank falls back to a generic prompt.
    #[serde(default)]
    pub question: String,
    /// Cap on how many of the session's last hits feed the prompt.
    pub max_hits: Option<usize>,
}

#[derive(Serialize)]
pub struct InsightsResponse {
    /// Provider that answered.
    pub provider: String,
    /// Model output, verbatim.
    pub answer: String,
}

/// `POST /api/insights`
pub async fn insights(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Option<Json<InsightsBody>>,
) -> Result<Json<InsightsResponse>, ApiError> {
    let (_, session) = state.require_session(&headers)?;
    let body = body.map(|Json(b)| b).unwrap_or_default();

    let tasks = state.store.list_tasks(true)?;
    let mut hits = session.last_hits;
    if let Some(cap) = body.max_hits {
        hits.truncate(cap);
    }
    let root = state.active_root();
    let input = InsightsInput {
        tasks: &tasks,
        hits: &hits,
        root_dir: &root,
    };
    let answer = generate_insights(state.provider.as_ref(), &input, &body.question).await?;
    Ok(Json(InsightsResponse {
        provider: state.provider.name(),
        answer,
    }))
}
