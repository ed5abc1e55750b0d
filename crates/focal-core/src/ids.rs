//! Row id minting.
//!
//! Every persisted record (task, AI log entry, integration row) and every
//! server session uses a random v4 UUID rendered as a lowercase hyphenated
//! string. Plain strings keep the store and wire layers simple; there is a
//! single user and no cross-table id arithmetic.

use uuid::Uuid;

/// Mint a new random id.
#[must_use]
pub fn new_id() -> String {
    Uuid::new_v4().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_unique() {
        assert_ne!(new_id(), new_id());
    }

    #[test]
    fn id_is_hyphenated_uuid() {
        let id = new_id();
        assert_eq!(id.len(), 36);
        assert_eq!(id.matches('-').count(), 4);
    }
}
