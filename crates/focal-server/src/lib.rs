//! # focal-server
//!
//! The HTTP surface of the dashboard: an Axum router over shared
//! [`AppState`], JSON APIs for tasks, file search, insights, and Drive,
//! plus the root page that doubles as the OAuth redirect callback.
//! Session context (identity, last search hits) lives in an in-memory
//! registry keyed by an opaque cookie.

#![deny(unsafe_code)]

pub mod error;
pub mod handlers;
pub mod router;
pub mod session;
pub mod state;

pub use error::ApiError;
pub use router::build_router;
pub use session::{Session, SessionRegistry};
pub use state::AppState;
