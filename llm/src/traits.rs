use async_trait::async_trait;
use thiserror::Error;

/// Backend families the runtime knows how to construct.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LLMBackend {
    /// OpenAI-compatible chat completions (DeepSeek by default).
    DeepSeek,
    /// A local or remote Ollama server.
    Ollama,
}

impl std::str::FromStr for LLMBackend {
    type Err = LLMError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "deepseek" | "openai" => Ok(Self::DeepSeek),
            "ollama" => Ok(Self::Ollama),
            other => Err(LLMError::UnknownBackend(other.to_string())),
        }
    }
}

#[derive(Debug, Error)]
pub enum LLMError {
    #[error("network error: {0}")]
    Network(String),
    #[error(transparent)]
    Http(#[from] reqwest::Error),
    #[error("server returned {0}: {1}")]
    Status(u16, String),
    #[error("invalid response")]
    InvalidResponse,
    #[error("invalid url: {0}")]
    InvalidUrl(String),
    #[error("unknown backend: {0}")]
    UnknownBackend(String),
}

/// One system-plus-user exchange sent to the model.
#[derive(Clone, Debug, PartialEq)]
pub struct ChatRequest {
    pub system: String,
    pub user: String,
    /// Upper bound on generated tokens. `None` leaves it to the provider.
    pub max_tokens: Option<u32>,
    /// Sampling temperature. `None` leaves it to the provider.
    pub temperature: Option<f32>,
}

impl ChatRequest {
    pub fn new(system: impl Into<String>, user: impl Into<String>) -> Self {
        Self {
            system: system.into(),
            user: user.into(),
            max_tokens: None,
            temperature: None,
        }
    }

    pub fn max_tokens(mut self, tokens: u32) -> Self {
        self.max_tokens = Some(tokens);
        self
    }

    pub fn temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }
}

#[async_trait]
pub trait LLMClient: Send + Sync {
    /// Send `request` and return the complete assistant text.
    async fn chat(&self, model: &str, request: &ChatRequest) -> Result<String, LLMError>;
}
