use crate::oracle::{ClassificationOracle, Verdict};
use crate::state::{ConversationState, Mood, MoodShift};
use indoc::indoc;

const INSTRUCTION: &str = indoc! {"
    You are the mood module of Exi, a Telegram bot.
    You receive a user's message. Decide which mood it puts the bot in.
    Choose exactly one of four words:

    - 'sweet' if the message is cute, a compliment, or shows care.
    - 'horny' if the message is lewd, mentions sex or arousal.
    - 'angry' if the message is aggressive or contains insults.
    - 'playful' if the message is neutral, joking, or a meme.

    Answer with a single word only."
};

/// Mood returned by [`MoodClassifier::classify`] and the transition it caused.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MoodUpdate {
    pub mood: Mood,
    pub shift: Option<MoodShift>,
}

/// Evaluate how a message makes the bot feel and keep the session mood current.
#[derive(Clone)]
pub struct MoodClassifier {
    oracle: ClassificationOracle,
}

impl MoodClassifier {
    pub fn new(oracle: ClassificationOracle) -> Self {
        Self { oracle }
    }

    /// Classify `utterance` and store the result in `state`.
    ///
    /// An answer outside the enumeration counts as [`Mood::Playful`]. When the
    /// oracle itself fails the state is left alone and its current mood is
    /// returned.
    pub async fn classify(&self, utterance: &str, state: &mut ConversationState) -> MoodUpdate {
        let mood = match self.oracle.classify::<Mood>(INSTRUCTION, utterance).await {
            Verdict::Label(mood) => mood,
            Verdict::Unrecognized(raw) => {
                log::debug!("mood {raw:?} not recognised, defaulting to playful");
                Mood::Playful
            }
            Verdict::Failed(e) => {
                log::error!("mood classification failed: {e}");
                return MoodUpdate {
                    mood: state.mood(),
                    shift: None,
                };
            }
        };
        let shift = state.set_mood(mood);
        if let Some(MoodShift { from, to }) = shift {
            log::info!("mood changed: {from} → {to}");
        }
        MoodUpdate { mood, shift }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use llm::MockLLMClient;
    use std::sync::Arc;

    fn classifier(client: MockLLMClient) -> MoodClassifier {
        MoodClassifier::new(ClassificationOracle::new(Arc::new(client), "mock"))
    }

    #[tokio::test]
    async fn updates_state_and_reports_shift() {
        let agent = classifier(MockLLMClient::new().answer("mood module", "sweet"));
        let mut state = ConversationState::new();
        let update = agent.classify("you're adorable", &mut state).await;
        assert_eq!(update.mood, Mood::Sweet);
        assert_eq!(
            update.shift,
            Some(MoodShift {
                from: Mood::Playful,
                to: Mood::Sweet
            })
        );
        assert_eq!(state.mood(), Mood::Sweet);
    }

    #[tokio::test]
    async fn same_mood_emits_no_shift() {
        let agent = classifier(MockLLMClient::new().answer("mood module", "playful"));
        let mut state = ConversationState::new();
        let update = agent.classify("lol", &mut state).await;
        assert_eq!(update.mood, Mood::Playful);
        assert_eq!(update.shift, None);
    }

    #[tokio::test]
    async fn failure_keeps_prior_mood() {
        let agent = classifier(MockLLMClient::new().fail("mood module"));
        let mut state = ConversationState::new();
        state.set_mood(Mood::Angry);
        let before = state.clone();
        let update = agent.classify("anything", &mut state).await;
        assert_eq!(update.mood, Mood::Angry);
        assert_eq!(update.shift, None);
        assert_eq!(state, before);
    }

    #[tokio::test]
    async fn unrecognised_label_defaults_to_playful() {
        let agent = classifier(MockLLMClient::new().answer("mood module", "melancholic"));
        let mut state = ConversationState::new();
        state.set_mood(Mood::Horny);
        let update = agent.classify("hmm", &mut state).await;
        assert_eq!(update.mood, Mood::Playful);
        assert_eq!(state.mood(), Mood::Playful);
    }
}
