//! Local Ollama provider.
//!
//! Talks to the native `/api/chat` endpoint rather than the OpenAI
//! compatibility layer; local models are slow to warm so the timeout is
//! generous.

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;

use crate::message::ChatMessage;
use crate::provider::{ChatProvider, ProviderError};

const HTTP_TIMEOUT: Duration = Duration::from_secs(120);
const TEMPERATURE: f32 = 0.2;

/// Ollama chat provider against a local daemon.
pub struct OllamaProvider {
    base_url: String,
    model: String,
    client: reqwest::Client,
}

#[derive(Deserialize)]
struct OllamaResponse {
    message: Option<OllamaMessage>,
}

#[derive(Deserialize)]
struct OllamaMessage {
    content: String,
}

impl OllamaProvider {
    #[must_use]
    pub fn new(base_url: String, model: String) -> Self {
        Self {
            base_url,
            model,
            client: reqwest::Client::new(),
        }
    }

    fn chat_url(&self) -> String {
        format!("{}/api/chat", self.base_url.trim_end_matches('/'))
    }
}

#[async_trait]
impl ChatProvider for OllamaProvider {
    fn name(&self) -> String {
        format!("ollama:{}", self.model)
    }

    #[tracing::instrument(skip_all, fields(provider = %self.name()))]
    async fn chat(&self, messages: &[ChatMessage]) -> Result<String, ProviderError> {
        let name = self.name();
        let body = serde_json::json!({
            "model": self.model,
            "messages": messages,
            "stream": false,
            "options": {"temperature": TEMPERATURE},
        });

        let response = self
            .client
            .post(self.chat_url())
            .timeout(HTTP_TIMEOUT)
            .json(&body)
            .send()
            .await
            .map_err(|source| ProviderError::Http {
                provider: name.clone(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(ProviderError::Api {
                provider: name,
                status: status.as_u16(),
                message,
            });
        }

        let parsed: OllamaResponse =
            response
                .json()
                .await
                .map_err(|source| ProviderError::Http {
                    provider: name.clone(),
                    source,
                })?;

        parsed
            .message
            .map(|m| m.content.trim().to_string())
            .ok_or_else(|| ProviderError::Malformed {
                provider: name,
                message: "response missing message content".to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use wiremock::matchers::{body_partial_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn chat_returns_trimmed_content() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/chat"))
            .and(body_partial_json(serde_json::json!({"stream": false})))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "message": {"role": "assistant", "content": "  local answer\n"}
            })))
            .mount(&server)
            .await;

        let provider = OllamaProvider::new(server.uri(), "llama3.1".to_string());
        let out = provider.chat(&[ChatMessage::user("hi")]).await.unwrap();
        assert_eq!(out, "local answer");
    }

    #[tokio::test]
    async fn missing_message_is_malformed() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/chat"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({"done": true})),
            )
            .mount(&server)
            .await;

        let provider = OllamaProvider::new(server.uri(), "llama3.1".to_string());
        let err = provider.chat(&[ChatMessage::user("hi")]).await.unwrap_err();
        assert_matches!(err, ProviderError::Malformed { .. });
    }

    #[tokio::test]
    async fn server_error_surfaces_status() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/chat"))
            .respond_with(ResponseTemplate::new(500).set_body_string("model not found"))
            .mount(&server)
            .await;

        let provider = OllamaProvider::new(server.uri(), "llama3.1".to_string());
        let err = provider.chat(&[ChatMessage::user("hi")]).await.unwrap_err();
        assert_matches!(err, ProviderError::Api { status: 500, .. });
    }
}
