//! Abstractions for interacting with large language model servers.
//!
//! The `llm` crate defines a [`LLMClient`] trait along with concrete
//! implementations for OpenAI-compatible endpoints ([`DeepSeekClient`]) and
//! Ollama ([`OllamaClient`]). Helpers build a client from the environment.

pub mod client;
pub mod deepseek;
pub mod mock;
pub mod runner;
pub mod traits;

pub use client::OllamaClient;
pub use deepseek::DeepSeekClient;
pub use mock::MockLLMClient;
pub use runner::{backend_from_env, client_from_env, default_model, model_from_env};
pub use traits::{ChatRequest, LLMBackend, LLMClient, LLMError};
