//! # focal-store
//!
//! SQLite persistence for the dashboard:
//!
//! - `tasks` — the task inbox; `completed_at IS NULL` means open
//! - `task_ai` — append-only log of AI plan output (or failures) per task
//! - `integrations` — one credential blob per (email, provider) pair
//!
//! Every operation opens its own connection, executes, and closes. There
//! is no pool and no cross-statement transaction; the system serves one
//! interactive user, so writers never realistically interleave. A
//! multi-user deployment would need serializable transactions here.

#![deny(unsafe_code)]

pub mod errors;
pub mod integrations;
pub mod models;
pub mod schema;
pub mod store;
pub mod task_ai;
pub mod tasks;

pub use errors::StoreError;
pub use models::{AiKind, IntegrationKey, Task, TaskAiRecord};
pub use store::Store;
