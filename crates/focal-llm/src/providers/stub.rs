//! Offline fallback provider.
//!
//! Selected when no real backend is configured; echoes the request so
//! the rest of the app stays usable without credentials.

use async_trait::async_trait;

use crate::message::{last_user_content, ChatMessage};
use crate::provider::{ChatProvider, ProviderError};

const ECHO_CAP: usize = 800;

/// Deterministic provider that never performs I/O.
#[derive(Default)]
pub struct StubProvider;

impl StubProvider {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl ChatProvider for StubProvider {
    fn name(&self) -> String {
        "stub".to_string()
    }

    async fn chat(&self, messages: &[ChatMessage]) -> Result<String, ProviderError> {
        let last = last_user_content(messages).unwrap_or("");
        let shown: String = last.chars().take(ECHO_CAP).collect();
        Ok(format!(
            "AI is not configured. Set OPENROUTER_API_KEY or OPENAI_API_KEY, \
             or run Ollama and set OLLAMA_BASE_URL / OLLAMA_MODEL.\n\n\
             You asked: {shown}"
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn echoes_last_user_message() {
        let messages = vec![
            ChatMessage::system("be terse"),
            ChatMessage::user("first"),
            ChatMessage::assistant("ok"),
            ChatMessage::user("second question"),
        ];
        let out = StubProvider::new().chat(&messages).await.unwrap();
        assert!(out.contains("second question"));
        assert!(!out.contains("first"));
    }

    #[tokio::test]
    async fn caps_long_input() {
        let long = "x".repeat(5000);
        let out = StubProvider::new()
            .chat(&[ChatMessage::user(&long)])
            .await
            .unwrap();
        assert!(out.len() < 1200);
    }
}
