//! Closed-set classification on top of a generative model.
//!
//! The model is asked to answer with a single word. Whatever comes back is
//! decoded through [`Label::decode`]; raw provider text never escapes as a
//! tagged value.

use llm::{ChatRequest, LLMClient, LLMError};
use std::sync::Arc;

/// Token budget for a one-word answer.
pub const LABEL_MAX_TOKENS: u32 = 5;

/// A closed enumeration the oracle may answer with.
pub trait Label: Copy + Sized + 'static {
    const ALL: &'static [Self];

    fn as_str(self) -> &'static str;

    /// Map free text to a member of [`Self::ALL`], ignoring case and
    /// surrounding punctuation or quotes.
    fn decode(raw: &str) -> Option<Self> {
        let word = raw
            .trim()
            .trim_matches(|c: char| !c.is_alphanumeric())
            .to_lowercase();
        Self::ALL.iter().copied().find(|l| l.as_str() == word)
    }
}

/// Result of a single classification request.
#[derive(Debug)]
pub enum Verdict<L> {
    Label(L),
    /// The model answered with something outside the enumeration.
    Unrecognized(String),
    Failed(LLMError),
}

#[derive(Clone)]
pub struct ClassificationOracle {
    client: Arc<dyn LLMClient>,
    model: String,
}

impl ClassificationOracle {
    pub fn new(client: Arc<dyn LLMClient>, model: impl Into<String>) -> Self {
        Self {
            client,
            model: model.into(),
        }
    }

    /// Ask for a label from `L` under `instruction`.
    pub async fn classify<L: Label>(&self, instruction: &str, utterance: &str) -> Verdict<L> {
        let req = ChatRequest::new(instruction, utterance)
            .max_tokens(LABEL_MAX_TOKENS)
            .temperature(0.0);
        match self.client.chat(&self.model, &req).await {
            Ok(raw) => match L::decode(&raw) {
                Some(label) => Verdict::Label(label),
                None => Verdict::Unrecognized(raw),
            },
            Err(e) => Verdict::Failed(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::Mood;

    #[test]
    fn decode_normalizes_case_and_punctuation() {
        assert_eq!(Mood::decode("Sweet"), Some(Mood::Sweet));
        assert_eq!(Mood::decode("  'angry'.\n"), Some(Mood::Angry));
        assert_eq!(Mood::decode("\"horny\""), Some(Mood::Horny));
    }

    #[test]
    fn decode_rejects_unknown_words() {
        assert_eq!(Mood::decode("sad"), None);
        assert_eq!(Mood::decode(""), None);
        assert_eq!(Mood::decode("sweet and playful"), None);
    }
}
