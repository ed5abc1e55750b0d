//! Provider selection.
//!
//! An ordered rule table: each rule pairs a predicate over [`LlmConfig`]
//! with a factory, and the first matching rule wins. Adding a backend
//! means adding a row, not editing a conditional ladder.

use std::sync::Arc;

use crate::config::LlmConfig;
use crate::provider::ChatProvider;
use crate::providers::{OllamaProvider, OpenAiProvider, OpenRouterProvider, StubProvider};

struct SelectionRule {
    name: &'static str,
    applies: fn(&LlmConfig) -> bool,
    build: fn(&LlmConfig) -> Arc<dyn ChatProvider>,
}

/// Precedence order: OpenRouter, then OpenAI, then Ollama (unless
/// disabled), with the stub as the unconditional last resort.
const RULES: &[SelectionRule] = &[
    SelectionRule {
        name: "openrouter",
        applies: |cfg| cfg.openrouter_api_key.is_some(),
        build: |cfg| {
            Arc::new(OpenRouterProvider::new(
                cfg.openrouter_api_key.clone().unwrap_or_default(),
                cfg.openrouter_model.clone(),
                cfg.openrouter_base_url.clone(),
            ))
        },
    },
    SelectionRule {
        name: "openai",
        applies: |cfg| cfg.openai_api_key.is_some(),
        build: |cfg| {
            Arc::new(OpenAiProvider::new(
                cfg.openai_api_key.clone().unwrap_or_default(),
                cfg.openai_model.clone(),
            ))
        },
    },
    SelectionRule {
        name: "ollama",
        applies: |cfg| !cfg.disable_ollama,
        build: |cfg| {
            Arc::new(OllamaProvider::new(
                cfg.ollama_base_url.clone(),
                cfg.ollama_model.clone(),
            ))
        },
    },
    SelectionRule {
        name: "stub",
        applies: |_| true,
        build: |_| Arc::new(StubProvider::new()),
    },
];

/// Pick the highest-precedence provider the config can support.
#[must_use]
pub fn select_provider(cfg: &LlmConfig) -> Arc<dyn ChatProvider> {
    for rule in RULES {
        if (rule.applies)(cfg) {
            tracing::debug!(rule = rule.name, "selected chat provider");
            return (rule.build)(cfg);
        }
    }
    // The stub rule always applies; this is unreachable in practice.
    Arc::new(StubProvider::new())
}
