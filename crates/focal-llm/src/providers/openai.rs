//! Direct `OpenAI` provider.

use async_trait::async_trait;

use crate::message::ChatMessage;
use crate::provider::{ChatProvider, ProviderError};
use crate::providers::openai_compat::post_chat_completions;

/// Chat-completions endpoint.
const CHAT_COMPLETIONS_URL: &str = "https://api.openai.com/v1/chat/completions";

/// `OpenAI` chat provider.
pub struct OpenAiProvider {
    api_key: String,
    model: String,
    url: String,
    client: reqwest::Client,
}

impl OpenAiProvider {
    /// Create a provider against the production endpoint.
    #[must_use]
    pub fn new(api_key: String, model: String) -> Self {
        Self::with_url(api_key, model, CHAT_COMPLETIONS_URL.to_string())
    }

    /// Create a provider against an explicit endpoint (tests).
    #[must_use]
    pub fn with_url(api_key: String, model: String, url: String) -> Self {
        Self {
            api_key,
            model,
            url,
            client: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl ChatProvider for OpenAiProvider {
    fn name(&self) -> String {
        format!("openai:{}", self.model)
    }

    #[tracing::instrument(skip_all, fields(provider = %self.name()))]
    async fn chat(&self, messages: &[ChatMessage]) -> Result<String, ProviderError> {
        post_chat_completions(
            &self.client,
            &self.url,
            &self.api_key,
            &self.model,
            messages,
            &self.name(),
        )
        .await
    }
}
