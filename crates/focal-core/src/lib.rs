//! # focal-core
//!
//! Foundation utilities for the Focal dashboard:
//!
//! - **IDs**: [`ids::new_id`] — random v4 UUIDs used as row ids everywhere
//! - **Time**: [`time`] — UTC now / RFC 3339 helpers shared by store and auth
//! - **Logging**: [`logging::init_tracing`] — subscriber setup for the binary
//!
//! ## Crate Position
//!
//! Foundation crate. Depended on by all other focal crates.

#![deny(unsafe_code)]

pub mod ids;
pub mod logging;
pub mod time;
