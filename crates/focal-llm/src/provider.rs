//! The chat provider contract.

use async_trait::async_trait;

use crate::message::ChatMessage;

/// Errors from a chat provider, always carrying the provider name.
#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    /// Transport-level failure.
    #[error("{provider}: request failed: {source}")]
    Http {
        /// Provider name (e.g. `openai:gpt-4o-mini`).
        provider: String,
        /// Underlying reqwest error.
        source: reqwest::Error,
    },

    /// The provider answered with a non-success status.
    #[error("{provider}: API error (status {status}): {message}")]
    Api {
        /// Provider name.
        provider: String,
        /// HTTP status code.
        status: u16,
        /// Response body, best effort.
        message: String,
    },

    /// The response did not have the expected shape.
    #[error("{provider}: malformed response: {message}")]
    Malformed {
        /// Provider name.
        provider: String,
        /// What was missing or wrong.
        message: String,
    },
}

impl ProviderError {
    /// Name of the provider that failed.
    #[must_use]
    pub fn provider(&self) -> &str {
        match self {
            Self::Http { provider, .. }
            | Self::Api { provider, .. }
            | Self::Malformed { provider, .. } => provider,
        }
    }
}

/// A chat-completion backend.
///
/// One implementation per provider; the caller picks exactly one via
/// [`crate::select::select_provider`] and holds it for the session.
#[async_trait]
pub trait ChatProvider: Send + Sync {
    /// Human-readable provider name, used in logs and persisted AI
    /// records (e.g. `ollama:llama3.1`).
    fn name(&self) -> String;

    /// Send the message list and return the assistant's text.
    async fn chat(&self, messages: &[ChatMessage]) -> Result<String, ProviderError>;
}
