//! # focal-drive
//!
//! Minimal Google Drive REST client for the dashboard: refresh an access
//! token from a stored refresh token, list files with a narrow field
//! projection, and pull a bounded text rendition of a single file
//! (exporting Google-native documents as plain text or CSV).

#![deny(unsafe_code)]

pub mod client;
pub mod credentials;
pub mod errors;

pub use client::{DriveClient, DriveEndpoints, DriveFile, FileList, DEFAULT_MAX_DOWNLOAD_BYTES};
pub use credentials::{pack_credentials, unpack_credentials};
pub use errors::DriveError;
