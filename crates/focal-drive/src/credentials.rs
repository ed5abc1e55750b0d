//! Stored Drive credentials.
//!
//! The integrations table persists one JSON blob per (email, provider);
//! for Drive that blob is `{"refresh_token": …}`. Unpacking is forgiving:
//! malformed data reads as "no credentials" rather than an error.

use serde::{Deserialize, Serialize};

#[derive(Deserialize, Serialize)]
struct DriveCredentials {
    #[serde(default)]
    refresh_token: Option<String>,
}

/// Serialize a refresh token for the integrations table.
#[must_use]
pub fn pack_credentials(refresh_token: &str) -> String {
    serde_json::json!({ "refresh_token": refresh_token }).to_string()
}

/// Read a refresh token back out of stored data.
#[must_use]
pub fn unpack_credentials(data: &str) -> Option<String> {
    serde_json::from_str::<DriveCredentials>(data)
        .ok()
        .and_then(|c| c.refresh_token)
        .filter(|t| !t.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trip() {
        let packed = pack_credentials("refresh-123");
        assert_eq!(unpack_credentials(&packed).as_deref(), Some("refresh-123"));
    }

    #[test]
    fn malformed_data_reads_as_absent() {
        assert_eq!(unpack_credentials("not json"), None);
        assert_eq!(unpack_credentials("{}"), None);
        assert_eq!(unpack_credentials(r#"{"refresh_token": ""}"#), None);
        assert_eq!(unpack_credentials("[1,2]"), None);
    }
}
