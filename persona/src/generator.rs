use crate::prompt_builder::PromptContext;
use llm::{ChatRequest, LLMClient, LLMError};
use std::sync::Arc;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GenerationError {
    #[error(transparent)]
    Oracle(#[from] LLMError),
    #[error("model returned an empty reply")]
    Empty,
}

/// Open-ended reply generation with the composed system prompt.
#[derive(Clone)]
pub struct ReplyGenerator {
    client: Arc<dyn LLMClient>,
    model: String,
}

impl ReplyGenerator {
    pub fn new(client: Arc<dyn LLMClient>, model: impl Into<String>) -> Self {
        Self {
            client,
            model: model.into(),
        }
    }

    pub async fn generate(
        &self,
        context: &PromptContext,
        utterance: &str,
    ) -> Result<String, GenerationError> {
        let req = ChatRequest::new(context.prompt.clone(), utterance);
        let reply = self.client.chat(&self.model, &req).await?;
        if reply.trim().is_empty() {
            return Err(GenerationError::Empty);
        }
        Ok(reply)
    }
}
