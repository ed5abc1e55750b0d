//! Shared OpenAI-compatible chat-completions call.
//!
//! Both the direct `OpenAI` provider and the OpenRouter aggregator speak
//! this schema; only the base URL, key, and model differ.

use std::time::Duration;

use serde::Deserialize;
use serde_json::json;

use crate::message::ChatMessage;
use crate::provider::ProviderError;

/// Sampling temperature for plan/insights generation.
const TEMPERATURE: f64 = 0.2;

/// Socket timeout for hosted chat-completion calls.
const HTTP_TIMEOUT: Duration = Duration::from_secs(60);

#[derive(Deserialize)]
struct CompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

/// POST a chat-completions request and extract the first choice's text.
pub(crate) async fn post_chat_completions(
    client: &reqwest::Client,
    url: &str,
    api_key: &str,
    model: &str,
    messages: &[ChatMessage],
    provider: &str,
) -> Result<String, ProviderError> {
    let body = json!({
        "model": model,
        "messages": messages,
        "temperature": TEMPERATURE,
    });

    let resp = client
        .post(url)
        .timeout(HTTP_TIMEOUT)
        .bearer_auth(api_key)
        .json(&body)
        .send()
        .await
        .map_err(|source| ProviderError::Http {
            provider: provider.to_string(),
            source,
        })?;

    let status = resp.status();
    if !status.is_success() {
        let message = resp.text().await.unwrap_or_default();
        return Err(ProviderError::Api {
            provider: provider.to_string(),
            status: status.as_u16(),
            message,
        });
    }

    let data: CompletionResponse =
        resp.json().await.map_err(|source| ProviderError::Http {
            provider: provider.to_string(),
            source,
        })?;

    data.choices
        .into_iter()
        .next()
        .and_then(|c| c.message.content)
        .ok_or_else(|| ProviderError::Malformed {
            provider: provider.to_string(),
            message: "no choices[0].message.content in response".to_string(),
        })
}
