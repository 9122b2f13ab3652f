use crate::deepseek::DEFAULT_DEEPSEEK_URL;
use crate::traits::{LLMBackend, LLMClient, LLMError};
use crate::{DeepSeekClient, OllamaClient};
use std::sync::Arc;

pub const DEFAULT_OLLAMA_URL: &str = "http://localhost:11434";

/// Read the backend family from `LLM_BACKEND`, defaulting to DeepSeek.
pub fn backend_from_env() -> Result<LLMBackend, LLMError> {
    match std::env::var("LLM_BACKEND") {
        Ok(v) => v.parse(),
        Err(_) => Ok(LLMBackend::DeepSeek),
    }
}

/// Read the model name from `LLM_MODEL`, falling back to a per-backend default.
pub fn model_from_env(backend: LLMBackend) -> String {
    std::env::var("LLM_MODEL").unwrap_or_else(|_| default_model(backend).into())
}

pub fn default_model(backend: LLMBackend) -> &'static str {
    match backend {
        LLMBackend::DeepSeek => "deepseek-chat",
        LLMBackend::Ollama => "gemma3:27b",
    }
}

/// Create a client for `backend` using `DEEPSEEK_URL`, `DEEPSEEK_API_KEY`
/// and `OLLAMA_URL`.
pub fn client_from_env(backend: LLMBackend) -> Result<Arc<dyn LLMClient>, LLMError> {
    match backend {
        LLMBackend::DeepSeek => {
            let url =
                std::env::var("DEEPSEEK_URL").unwrap_or_else(|_| DEFAULT_DEEPSEEK_URL.into());
            let key = std::env::var("DEEPSEEK_API_KEY").ok().filter(|k| !k.is_empty());
            if key.is_none() {
                log::warn!("DEEPSEEK_API_KEY is not set; replies will likely fail");
            }
            Ok(Arc::new(DeepSeekClient::new(url, key)))
        }
        LLMBackend::Ollama => {
            let url = std::env::var("OLLAMA_URL").unwrap_or_else(|_| DEFAULT_OLLAMA_URL.into());
            Ok(Arc::new(OllamaClient::new(&url)?))
        }
    }
}
