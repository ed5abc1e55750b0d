//! # focal-llm
//!
//! The LLM gateway: one [`ChatProvider`] trait with an implementation per
//! HTTP provider plus a deterministic offline stub, and a precedence-based
//! selection chain over the configured credentials.
//!
//! A chat call is a single blocking request from the caller's perspective:
//! no streaming, no retry. Failures carry the provider name and cause and
//! are surfaced to the caller as-is.

#![deny(unsafe_code)]

pub mod config;
pub mod message;
pub mod provider;
pub mod providers;
pub mod select;

pub use config::LlmConfig;
pub use message::{ChatMessage, Role};
pub use provider::{ChatProvider, ProviderError};
pub use providers::{OllamaProvider, OpenAiProvider, OpenRouterProvider, StubProvider};
pub use select::select_provider;
