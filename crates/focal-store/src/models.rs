//! Store row types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A task in the inbox.
///
/// Invariant: `completed_at` is `None` exactly when the task is open.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Row id (UUID string).
    pub id: String,
    /// Task title as entered, trimmed.
    pub title: String,
    /// Creation time (UTC).
    pub created_at: DateTime<Utc>,
    /// Completion time, set by the completion toggle.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<DateTime<Utc>>,
}

impl Task {
    /// Whether the task is still open.
    #[must_use]
    pub fn is_open(&self) -> bool {
        self.completed_at.is_none()
    }
}

/// Kind of an AI output record.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AiKind {
    /// A generated plan (JSON or raw text).
    Plan,
    /// A failed generation attempt; content holds the error text.
    PlanError,
}

impl AiKind {
    /// Database representation.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Plan => "plan",
            Self::PlanError => "plan_error",
        }
    }

    /// Parse the database representation.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "plan" => Some(Self::Plan),
            "plan_error" => Some(Self::PlanError),
            _ => None,
        }
    }
}

/// One append-only AI output record attached to a task.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskAiRecord {
    /// Row id (UUID string).
    pub id: String,
    /// Owning task id.
    pub task_id: String,
    /// Creation time (UTC).
    pub created_at: DateTime<Utc>,
    /// Provider name that produced this record (e.g. `openai:gpt-4o-mini`).
    pub provider: String,
    /// Record kind.
    pub kind: AiKind,
    /// JSON plan or raw error text.
    pub content: String,
}

/// Key identifying one integration credential row.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IntegrationKey {
    /// Owner email, normalized (trimmed, lowercased).
    pub user_email: String,
    /// Integration provider name (e.g. `google_drive`).
    pub provider: String,
}

impl IntegrationKey {
    /// Build a key, normalizing the email.
    #[must_use]
    pub fn new(user_email: &str, provider: &str) -> Self {
        Self {
            user_email: user_email.trim().to_lowercase(),
            provider: provider.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ai_kind_round_trips() {
        for kind in [AiKind::Plan, AiKind::PlanError] {
            assert_eq!(AiKind::parse(kind.as_str()), Some(kind));
        }
        assert_eq!(AiKind::parse("bogus"), None);
    }

    #[test]
    fn integration_key_normalizes_email() {
        let key = IntegrationKey::new("  User@Example.COM ", "google_drive");
        assert_eq!(key.user_email, "user@example.com");
    }
}
