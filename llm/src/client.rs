//! HTTP client for interacting with an Ollama language model server.
//!
//! This module provides the [`OllamaClient`] type which implements the
//! [`LLMClient`] trait on top of `ollama-rs` generation requests.

use crate::traits::{ChatRequest, LLMClient, LLMError};
use async_trait::async_trait;

use ollama_rs::{
    generation::completion::request::GenerationRequest, models::ModelOptions, Ollama,
};

pub struct OllamaClient {
    inner: Ollama,
}

impl OllamaClient {
    pub fn new(base_url: impl AsRef<str>) -> Result<Self, LLMError> {
        let inner = Ollama::try_new(base_url.as_ref())
            .map_err(|e| LLMError::InvalidUrl(format!("{}: {e}", base_url.as_ref())))?;
        Ok(Self { inner })
    }
}

#[async_trait]
impl LLMClient for OllamaClient {
    async fn chat(&self, model: &str, request: &ChatRequest) -> Result<String, LLMError> {
        let mut options = ModelOptions::default();
        if let Some(t) = request.temperature {
            options = options.temperature(t);
        }
        if let Some(n) = request.max_tokens {
            options = options.num_predict(n as i32);
        }
        let req = GenerationRequest::new(model.to_string(), request.user.clone())
            .system(request.system.clone())
            .options(options);
        let res = self
            .inner
            .generate(req)
            .await
            .map_err(|e| LLMError::Network(e.to_string()))?;
        Ok(res.response)
    }
}
