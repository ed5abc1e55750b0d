//! Stateless signed OAuth state tokens.
//!
//! Token format: `base64url(payload_json) . base64url(hmac_sha256)`,
//! both parts unpadded. The signature is computed over the encoded
//! payload part, so verification recomputes it from the received bytes
//! without re-serializing. Everything needed to validate a redirect leg
//! travels inside the token; the only secret is the signing key held in
//! process configuration.

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use hmac::{Hmac, Mac};
use serde::{Deserialize, Serialize};
use sha2::Sha256;

use focal_core::time;

type HmacSha256 = Hmac<Sha256>;

/// Purpose tag for the login flow.
pub const PURPOSE_LOGIN: &str = "login";

/// Purpose tag for the Google Drive connect flow.
pub const PURPOSE_DRIVE_CONNECT: &str = "drive-connect";

/// Default token lifetime: 15 minutes.
pub const DEFAULT_STATE_TTL_SECONDS: i64 = 15 * 60;

/// Nonce entropy in bytes.
const NONCE_BYTES: usize = 16;

/// Signed state token payload.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatePayload {
    /// Random nonce (base64url of 16 random bytes).
    pub nonce: String,
    /// Expiry, unix seconds.
    pub exp: i64,
    /// Flow tag the callback must match (`login` or `drive-connect`).
    pub purpose: String,
    /// Email the flow is bound to, if any (Drive connect).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

fn mac_for(secret: &str) -> HmacSha256 {
    // HMAC accepts keys of any length; new_from_slice cannot fail here.
    HmacSha256::new_from_slice(secret.as_bytes()).expect("HMAC key of any length")
}

/// Sign a state token.
///
/// The payload carries a fresh random nonce, `now + ttl_seconds` as
/// expiry, the purpose tag, and the optionally bound email.
#[must_use]
pub fn sign_state(
    secret: &str,
    purpose: &str,
    ttl_seconds: i64,
    bound_email: Option<&str>,
) -> String {
    let nonce_bytes: [u8; NONCE_BYTES] = rand::random();
    let payload = StatePayload {
        nonce: URL_SAFE_NO_PAD.encode(nonce_bytes),
        exp: time::now_unix_seconds() + ttl_seconds,
        purpose: purpose.to_string(),
        email: bound_email.map(str::to_string),
    };

    let payload_json = serde_json::to_string(&payload).expect("payload serializes");
    let payload_part = URL_SAFE_NO_PAD.encode(payload_json.as_bytes());

    let mut mac = mac_for(secret);
    mac.update(payload_part.as_bytes());
    let sig_part = URL_SAFE_NO_PAD.encode(mac.finalize().into_bytes());

    format!("{payload_part}.{sig_part}")
}

/// Verify a state token, returning its payload if and only if the
/// signature matches (constant-time compare), the payload parses, and
/// the expiry has not passed.
#[must_use]
pub fn verify_state(token: &str, secret: &str) -> Option<StatePayload> {
    let (payload_part, sig_part) = token.split_once('.')?;
    let sig_bytes = URL_SAFE_NO_PAD.decode(sig_part).ok()?;

    let mut mac = mac_for(secret);
    mac.update(payload_part.as_bytes());
    if mac.verify_slice(&sig_bytes).is_err() {
        return None;
    }

    let payload_json = URL_SAFE_NO_PAD.decode(payload_part).ok()?;
    let payload: StatePayload = serde_json::from_slice(&payload_json).ok()?;

    if time::now_unix_seconds() > payload.exp {
        return None;
    }
    Some(payload)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "test-signing-secret";

    #[test]
    fn sign_verify_round_trip() {
        let token = sign_state(SECRET, PURPOSE_LOGIN, 60, None);
        let payload = verify_state(&token, SECRET).unwrap();
        assert_eq!(payload.purpose, PURPOSE_LOGIN);
        assert_eq!(payload.email, None);
    }

    #[test]
    fn bound_email_round_trips() {
        let token = sign_state(SECRET, PURPOSE_DRIVE_CONNECT, 60, Some("me@example.com"));
        let payload = verify_state(&token, SECRET).unwrap();
        assert_eq!(payload.purpose, PURPOSE_DRIVE_CONNECT);
        assert_eq!(payload.email.as_deref(), Some("me@example.com"));
    }

    #[test]
    fn expired_token_is_rejected() {
        let token = sign_state(SECRET, PURPOSE_LOGIN, -1, None);
        assert!(verify_state(&token, SECRET).is_none());
    }

    #[test]
    fn wrong_secret_is_rejected() {
        let token = sign_state(SECRET, PURPOSE_LOGIN, 60, None);
        assert!(verify_state(&token, "other-secret").is_none());
    }

    #[test]
    fn any_altered_signature_byte_is_rejected() {
        let token = sign_state(SECRET, PURPOSE_LOGIN, 60, None);
        let (payload_part, sig_part) = token.split_once('.').unwrap();
        for i in 0..sig_part.len() {
            let mut sig: Vec<u8> = sig_part.bytes().collect();
            sig[i] = if sig[i] == b'A' { b'B' } else { b'A' };
            let tampered = format!("{payload_part}.{}", String::from_utf8(sig).unwrap());
            assert!(
                verify_state(&tampered, SECRET).is_none(),
                "altered byte {i} accepted"
            );
        }
    }

    #[test]
    fn tampered_payload_is_rejected() {
        let token = sign_state(SECRET, PURPOSE_LOGIN, 60, None);
        let (_, sig_part) = token.split_once('.').unwrap();
        let forged_payload = URL_SAFE_NO_PAD.encode(
            serde_json::json!({"nonce": "x", "exp": i64::MAX, "purpose": "login"}).to_string(),
        );
        assert!(verify_state(&format!("{forged_payload}.{sig_part}"), SECRET).is_none());
    }

    #[test]
    fn malformed_tokens_are_rejected() {
        assert!(verify_state("", SECRET).is_none());
        assert!(verify_state("no-dot", SECRET).is_none());
        assert!(verify_state("a.b.c", SECRET).is_none());
        assert!(verify_state("!bad base64!.sig", SECRET).is_none());
    }

    #[test]
    fn nonce_has_full_entropy_and_varies() {
        let a = sign_state(SECRET, PURPOSE_LOGIN, 60, None);
        let b = sign_state(SECRET, PURPOSE_LOGIN, 60, None);
        assert_ne!(a, b);
        let payload = verify_state(&a, SECRET).unwrap();
        // 16 bytes base64url without padding = 22 characters.
        assert_eq!(payload.nonce.len(), 22);
    }
}
