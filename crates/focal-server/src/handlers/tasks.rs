//! Task CRUD and per-task plan endpoints.

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::HeaderMap;
use focal_agent::generate_task_plan;
use focal_store::{AiKind, Task, TaskAiRecord};
use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::state::AppState;

const DEFAULT_PLAN_LIST_LIMIT: usize = 20;

#[derive(Deserialize)]
pub struct CreateTaskBody {
    /// Task title; must be non-blank after trimming.
    pub title: String,
}

#[derive(Default, Deserialize)]
pub struct ListTasksQuery {
    /// Include completed tasks in the listing.
    #[serde(default)]
    pub include_completed: bool,
}

#[derive(Deserialize)]
pub struct CompleteTaskBody {
    /// Target state; `false` reopens the task.
    #[serde(default = "default_true")]
    pub completed: bool,
}

fn default_true() -> bool {
    true
}

#[derive(Deserialize)]
pub struct DeleteTasksBody {
    /// Ids to delete; unknown ids are ignored.
    pub ids: Vec<String>,
}

#[derive(Serialize)]
pub struct DeleteTasksResponse {
    /// How many rows were actually deleted.
    pub deleted: usize,
}

#[derive(Deserialize)]
pub struct PlanBody {
    /// Extra context to hand the model alongside the title.
    #[serde(default)]
    pub context: String,
}

#[derive(Serialize)]
pub struct PlanResponse {
    /// Provider that produced the plan.
    pub provider: String,
    /// Stored plan text (pretty JSON when the model complied).
    pub content: String,
    /// Parsed plan, when the reply was valid JSON.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parsed: Option<serde_json::Value>,
}

#[derive(Default, Deserialize)]
pub struct ListPlansQuery {
    /// Maximum records to return.
    pub limit: Option<usize>,
}

/// `POST /api/tasks`
pub async fn create_task(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(body): Json<CreateTaskBody>,
) -> Result<Json<Task>, ApiError> {
    let _ = state.require_session(&headers)?;
    if body.title.trim().is_empty() {
        return Err(ApiError::BadRequest("title must not be blank".into()));
    }
    Ok(Json(state.store.add_task(&body.title)?))
}

/// `GET /api/tasks`
pub async fn list_tasks(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<ListTasksQuery>,
) -> Result<Json<Vec<Task>>, ApiError> {
    let _ = state.require_session(&headers)?;
    Ok(Json(state.store.list_tasks(query.include_completed)?))
}

/// `POST /api/tasks/{id}/complete`
pub async fn complete_task(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(task_id): Path<String>,
    body: Option<Json<CompleteTaskBody>>,
) -> Result<Json<Task>, ApiError> {
    let _ = state.require_session(&headers)?;
    let completed = body.map_or(true, |Json(b)| b.completed);
    if state.store.get_task(&task_id)?.is_none() {
        return Err(ApiError::NotFound("task"));
    }
    state.store.set_task_completed(&task_id, completed)?;
    state
        .store
        .get_task(&task_id)?
        .map(Json)
        .ok_or(ApiError::NotFound("task"))
}

/// `DELETE /api/tasks`
pub async fn delete_tasks(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(body): Json<DeleteTasksBody>,
) -> Result<Json<DeleteTasksResponse>, ApiError> {
    let _ = state.require_session(&headers)?;
    let deleted = state.store.delete_tasks(&body.ids)?;
    Ok(Json(DeleteTasksResponse { deleted }))
}

/// `POST /api/tasks/{id}/plan`
///
/// Success appends a `plan` record; a provider failure appends a
/// `plan_error` record carrying the error text, then surfaces the error.
pub async fn generate_plan(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(task_id): Path<String>,
    body: Option<Json<PlanBody>>,
) -> Result<Json<PlanResponse>, ApiError> {
    let _ = state.require_session(&headers)?;
    let task = state
        .store
        .get_task(&task_id)?
        .ok_or(ApiError::NotFound("task"))?;
    let context = body.map(|Json(b)| b.context).unwrap_or_default();
    let provider_name = state.provider.name();

    match generate_task_plan(state.provider.as_ref(), &task.title, &context).await {
        Ok(plan) => {
            let _ = state
                .store
                .add_task_ai(&task_id, &provider_name, AiKind::Plan, &plan.content)?;
            Ok(Json(PlanResponse {
                provider: provider_name,
                content: plan.content,
                parsed: plan.parsed,
            }))
        }
        Err(err) => {
            let _ = state.store.add_task_ai(
                &task_id,
                &provider_name,
                AiKind::PlanError,
                &err.to_string(),
            )?;
            Err(err.into())
        }
    }
}

/// `GET /api/tasks/{id}/plans`
pub async fn list_plans(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(task_id): Path<String>,
    Query(query): Query<ListPlansQuery>,
) -> Result<Json<Vec<TaskAiRecord>>, ApiError> {
    let _ = state.require_session(&headers)?;
    if state.store.get_task(&task_id)?.is_none() {
        return Err(ApiError::NotFound("task"));
    }
    let limit = query.limit.unwrap_or(DEFAULT_PLAN_LIST_LIMIT);
    Ok(Json(state.store.list_task_ai(&task_id, None, limit)?))
}
