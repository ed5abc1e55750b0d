//! # focal-settings
//!
//! Configuration for the Focal dashboard, from two sources:
//!
//! 1. **Environment** — [`Config::from_env`] resolves the search root,
//!    data directory, and database path once at startup.
//! 2. **Persisted file** — [`PersistedSettings`] is a small JSON document
//!    (`settings.json` in the data directory) holding the user's active
//!    search root. Loading is forgiving: a missing, unreadable, or
//!    malformed file yields defaults with a warning rather than an error.
//!
//! Provider credentials are read from the environment by the crates that
//! own them (`focal-auth`, `focal-llm`); this crate only covers paths and
//! the persisted document.

#![deny(unsafe_code)]

pub mod config;
pub mod errors;
pub mod persisted;

pub use config::Config;
pub use errors::SettingsError;
pub use persisted::{PersistedSettings, load_settings, save_settings};
