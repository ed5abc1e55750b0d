//! Provider credentials and model names from the environment.

/// Default OpenRouter model.
const DEFAULT_OPENROUTER_MODEL: &str = "openrouter/auto";

/// Default OpenRouter API base.
const DEFAULT_OPENROUTER_BASE_URL: &str = "https://openrouter.ai/api/v1";

/// Default `OpenAI` model.
const DEFAULT_OPENAI_MODEL: &str = "gpt-4o-mini";

/// Default Ollama base URL.
const DEFAULT_OLLAMA_BASE_URL: &str = "http://localhost:11434";

/// Default Ollama model.
const DEFAULT_OLLAMA_MODEL: &str = "llama3.1";

/// LLM provider configuration, read once from the environment.
#[derive(Clone, Debug, Default)]
pub struct LlmConfig {
    /// OpenRouter API key (aggregator; highest precedence).
    pub openrouter_api_key: Option<String>,
    /// OpenRouter model name.
    pub openrouter_model: String,
    /// OpenRouter API base URL.
    pub openrouter_base_url: String,
    /// `OpenAI` API key (direct provider).
    pub openai_api_key: Option<String>,
    /// `OpenAI` model name.
    pub openai_model: String,
    /// Ollama base URL (local fallback).
    pub ollama_base_url: String,
    /// Ollama model name.
    pub ollama_model: String,
    /// Skip the local Ollama fallback entirely.
    pub disable_ollama: bool,
}

impl LlmConfig {
    /// Load from `OPENROUTER_*`, `OPENAI_*`, `OLLAMA_*`, and
    /// `DISABLE_OLLAMA`.
    #[must_use]
    pub fn from_env() -> Self {
        Self {
            openrouter_api_key: non_empty_env("OPENROUTER_API_KEY"),
            openrouter_model: non_empty_env("OPENROUTER_MODEL")
                .unwrap_or_else(|| DEFAULT_OPENROUTER_MODEL.to_string()),
            openrouter_base_url: non_empty_env("OPENROUTER_BASE_URL")
                .unwrap_or_else(|| DEFAULT_OPENROUTER_BASE_URL.to_string()),
            openai_api_key: non_empty_env("OPENAI_API_KEY"),
            openai_model: non_empty_env("OPENAI_MODEL")
                .unwrap_or_else(|| DEFAULT_OPENAI_MODEL.to_string()),
            ollama_base_url: non_empty_env("OLLAMA_BASE_URL")
                .unwrap_or_else(|| DEFAULT_OLLAMA_BASE_URL.to_string()),
            ollama_model: non_empty_env("OLLAMA_MODEL")
                .unwrap_or_else(|| DEFAULT_OLLAMA_MODEL.to_string()),
            disable_ollama: is_truthy(&std::env::var("DISABLE_OLLAMA").unwrap_or_default()),
        }
    }

    /// A config with compiled defaults and no credentials (tests).
    #[must_use]
    pub fn offline() -> Self {
        Self {
            openrouter_api_key: None,
            openrouter_model: DEFAULT_OPENROUTER_MODEL.to_string(),
            openrouter_base_url: DEFAULT_OPENROUTER_BASE_URL.to_string(),
            openai_api_key: None,
            openai_model: DEFAULT_OPENAI_MODEL.to_string(),
            ollama_base_url: DEFAULT_OLLAMA_BASE_URL.to_string(),
            ollama_model: DEFAULT_OLLAMA_MODEL.to_string(),
            disable_ollama: true,
        }
    }
}

fn non_empty_env(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// `1`, `true`, and `yes` (case-insensitive) count as enabled.
fn is_truthy(raw: &str) -> bool {
    matches!(raw.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truthy_values() {
        for v in ["1", "true", "YES", " yes "] {
            assert!(is_truthy(v), "{v:?} should be truthy");
        }
        for v in ["", "0", "no", "off"] {
            assert!(!is_truthy(v), "{v:?} should be falsy");
        }
    }

    #[test]
    fn offline_config_has_no_credentials() {
        let cfg = LlmConfig::offline();
        assert!(cfg.openrouter_api_key.is_none());
        assert!(cfg.openai_api_key.is_none());
        assert!(cfg.disable_ollama);
    }
}
