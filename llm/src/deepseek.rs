//! Client for OpenAI-compatible chat completion endpoints.
//!
//! DeepSeek exposes the same `/chat/completions` contract as OpenAI, so the
//! [`DeepSeekClient`] works against any server speaking that dialect.

use crate::traits::{ChatRequest, LLMClient, LLMError};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

pub const DEFAULT_DEEPSEEK_URL: &str = "https://api.deepseek.com";

pub struct DeepSeekClient {
    pub base_url: String,
    api_key: Option<String>,
    client: reqwest::Client,
}

#[derive(Serialize)]
struct Message<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Serialize)]
struct CompletionRequest<'a> {
    model: &'a str,
    messages: Vec<Message<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    stream: bool,
}

#[derive(Deserialize)]
struct CompletionResponse {
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

impl DeepSeekClient {
    pub fn new(base_url: impl Into<String>, api_key: Option<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            base_url,
            api_key,
            client: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl LLMClient for DeepSeekClient {
    async fn chat(&self, model: &str, request: &ChatRequest) -> Result<String, LLMError> {
        let url = format!("{}/chat/completions", self.base_url);
        let body = CompletionRequest {
            model,
            messages: vec![
                Message {
                    role: "system",
                    content: &request.system,
                },
                Message {
                    role: "user",
                    content: &request.user,
                },
            ],
            max_tokens: request.max_tokens,
            temperature: request.temperature,
            stream: false,
        };
        let mut req = self.client.post(url).json(&body);
        if let Some(key) = &self.api_key {
            req = req.bearer_auth(key);
        }
        let resp = req.send().await?;
        let status = resp.status();
        if !status.is_success() {
            let text = resp.text().await.unwrap_or_default();
            return Err(LLMError::Status(status.as_u16(), text));
        }
        let parsed: CompletionResponse = resp
            .json()
            .await
            .map_err(|_| LLMError::InvalidResponse)?;
        let choice = parsed
            .choices
            .into_iter()
            .next()
            .ok_or(LLMError::InvalidResponse)?;
        Ok(choice.message.content.unwrap_or_default())
    }
}
