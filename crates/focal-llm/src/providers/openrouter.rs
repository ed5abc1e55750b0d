//! OpenRouter aggregator provider.
//!
//! OpenAI-compatible wire format behind a configurable base URL; takes
//! precedence over every other provider when its key is configured.

use async_trait::async_trait;

use crate::message::ChatMessage;
use crate::provider::{ChatProvider, ProviderError};
use crate::providers::openai_compat::post_chat_completions;

/// OpenRouter chat provider.
pub struct OpenRouterProvider {
    api_key: String,
    model: String,
    base_url: String,
    client: reqwest::Client,
}

impl OpenRouterProvider {
    /// Create a provider; `base_url` is the API root (e.g.
    /// `https://openrouter.ai/api/v1`).
    #[must_use]
    pub fn new(api_key: String, model: String, base_url: String) -> Self {
        Self {
            api_key,
            model,
            base_url,
            client: reqwest::Client::new(),
        }
    }

    fn chat_url(&self) -> String {
        format!("{}/chat/completions", self.base_url.trim_end_matches('/'))
    }
}

#[async_trait]
impl ChatProvider for OpenRouterProvider {
    fn name(&self) -> String {
        format!("openrouter:{}", self.model)
    }

    #[tracing::instrument(skip_all, fields(provider = %self.name()))]
    async fn chat(&self, messages: &[ChatMessage]) -> Result<String, ProviderError> {
        post_chat_completions(
            &self.client,
            &self.chat_url(),
            &self.api_key,
            &self.model,
            messages,
            &self.name(),
        )
        .await
    }
}
