//! # focal-search
//!
//! Line-oriented text search over a directory tree:
//!
//! - [`walk::iter_files`]: deterministic recursive enumeration with an
//!   ignore-directory set and a file cap
//! - [`classify::is_probably_text`]: extension allow-list plus a NUL-byte
//!   heuristic for everything else
//! - [`search_files`]: compile the query once, scan accepted files line by
//!   line, stop at the hit cap
//! - [`read_snippet`]: context window around a hit line
//! - [`file_stats`]: extension histogram over the same enumeration
//!
//! Per-file I/O errors are swallowed (skip and continue); the only fatal
//! error is an invalid regex, which aborts the whole search with no
//! partial results.

#![deny(unsafe_code)]

pub mod classify;
pub mod errors;
pub mod search;
pub mod snippet;
pub mod stats;
pub mod walk;

pub use errors::SearchError;
pub use search::{FileHit, SearchOptions, search_files};
pub use snippet::read_snippet;
pub use stats::file_stats;
