//! HTTP handlers, grouped by surface.

pub mod auth;
pub mod drive;
pub mod insights;
pub mod pages;
pub mod search;
pub mod settings;
pub mod tasks;
