//! In-memory [`LLMClient`] used in unit tests across the workspace.

use crate::traits::{ChatRequest, LLMClient, LLMError};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;

/// Answers requests according to the first instruction fragment it recognises.
///
/// Each rule maps a substring of the system prompt to an answer. `None`
/// answers simulate a transport failure. Requests matching no rule also fail.
#[derive(Default)]
pub struct MockLLMClient {
    rules: Vec<(String, Option<String>)>,
    requests: Mutex<Vec<ChatRequest>>,
}

impl MockLLMClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer `reply` whenever the system prompt contains `fragment`.
    pub fn answer(mut self, fragment: impl Into<String>, reply: impl Into<String>) -> Self {
        self.rules.push((fragment.into(), Some(reply.into())));
        self
    }

    /// Fail whenever the system prompt contains `fragment`.
    pub fn fail(mut self, fragment: impl Into<String>) -> Self {
        self.rules.push((fragment.into(), None));
        self
    }

    /// Every request received so far, in order.
    pub fn requests(&self) -> Vec<ChatRequest> {
        self.requests
            .lock()
            .map(|r| r.clone())
            .unwrap_or_default()
    }

    /// Number of requests whose system prompt contained `fragment`.
    pub fn count(&self, fragment: &str) -> usize {
        self.requests()
            .iter()
            .filter(|r| r.system.contains(fragment))
            .count()
    }

    /// Per-fragment request counts, handy for asserting nothing was called.
    pub fn counts(&self) -> HashMap<String, usize> {
        self.rules
            .iter()
            .map(|(f, _)| (f.clone(), self.count(f)))
            .collect()
    }
}

#[async_trait]
impl LLMClient for MockLLMClient {
    async fn chat(&self, _model: &str, request: &ChatRequest) -> Result<String, LLMError> {
        if let Ok(mut log) = self.requests.lock() {
            log.push(request.clone());
        }
        let rule = self
            .rules
            .iter()
            .find(|(fragment, _)| request.system.contains(fragment.as_str()));
        match rule {
            Some((_, Some(reply))) => Ok(reply.clone()),
            Some((_, None)) => Err(LLMError::Network("scripted failure".into())),
            None => Err(LLMError::InvalidResponse),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn answers_by_fragment_and_records() {
        let client = MockLLMClient::new()
            .answer("mood", "sweet")
            .fail("insult");
        let ok = client
            .chat("m", &ChatRequest::new("pick a mood", "hi"))
            .await
            .unwrap();
        assert_eq!(ok, "sweet");
        assert!(client
            .chat("m", &ChatRequest::new("detect insult", "hi"))
            .await
            .is_err());
        assert!(client
            .chat("m", &ChatRequest::new("unknown", "hi"))
            .await
            .is_err());
        assert_eq!(client.requests().len(), 3);
        assert_eq!(client.count("mood"), 1);
    }
}
