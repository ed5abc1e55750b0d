//! Provider implementations.
//!
//! OpenRouter and `OpenAI` share the OpenAI-compatible chat-completions
//! wire format ([`openai_compat`]); Ollama speaks its native JSON; the
//! stub never touches the network.

pub mod ollama;
pub mod openai;
pub mod openai_compat;
pub mod openrouter;
pub mod stub;

pub use ollama::OllamaProvider;
pub use openai::OpenAiProvider;
pub use openrouter::OpenRouterProvider;
pub use stub::StubProvider;
