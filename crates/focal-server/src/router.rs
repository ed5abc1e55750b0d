//! Router assembly.

use axum::Router;
use axum::routing::{get, post};
use tower_http::trace::TraceLayer;

use crate::handlers::{auth, drive, insights, pages, search, settings, tasks};
use crate::state::AppState;

/// Build the full router over shared state.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(pages::index))
        .route(
            "/api/tasks",
            post(tasks::create_task)
                .get(tasks::list_tasks)
                .delete(tasks::delete_tasks),
        )
        .route("/api/tasks/{id}/complete", post(tasks::complete_task))
        .route("/api/tasks/{id}/plan", post(tasks::generate_plan))
        .route("/api/tasks/{id}/plans", get(tasks::list_plans))
        .route("/api/search", post(search::search))
        .route("/api/stats", get(search::stats))
        .route("/api/snippet", get(search::snippet))
        .route("/api/insights", post(insights::insights))
        .route("/api/root", get(settings::get_root).put(settings::set_root))
        .route("/api/drive/connect", get(drive::connect))
        .route("/api/drive/status", get(drive::status))
        .route("/api/drive/disconnect", post(drive::disconnect))
        .route("/api/drive/files", get(drive::list_files))
        .route("/api/drive/analyze", post(drive::analyze))
        .route("/api/logout", post(auth::logout))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
