use crate::oracle::{ClassificationOracle, Label, Verdict};
use indoc::indoc;
use std::fmt;

const INSTRUCTION: &str = indoc! {"
    You are the insult detector of Exi, a Telegram bot.
    Decide whether the user's message insults the bot. Answer with exactly one word:
    - 'general' for a general insult that is not aimed at you personally.
    - 'direct' for an insult aimed directly at you, in declarative form.
    - 'question' for an insult phrased as a question (for example, containing '?').
    - 'none' when there is no insult.

    IMPORTANT:
    - Sexual or lustful messages (admitting arousal, compliments about the body, hints at sex, horny jokes) are NOT insults. Always answer 'none' for them.
    - Friendly teasing with diminutive or affectionate word forms, or messages with meme emoticons (:3, OwO, UwU, xD, XD, 😂, 🤣 and similar) are jokes, not insults. Answer 'none'.

    Answer with a single word only."
};

/// How (and whether) a message insults the bot.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum InsultKind {
    #[default]
    None,
    General,
    Direct,
    Question,
}

impl Label for InsultKind {
    const ALL: &'static [Self] = &[Self::None, Self::General, Self::Direct, Self::Question];

    fn as_str(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::General => "general",
            Self::Direct => "direct",
            Self::Question => "question",
        }
    }
}

impl fmt::Display for InsultKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Oracle-backed insult detector. Fails safe to [`InsultKind::None`].
#[derive(Clone)]
pub struct InsultClassifier {
    oracle: ClassificationOracle,
}

impl InsultClassifier {
    pub fn new(oracle: ClassificationOracle) -> Self {
        Self { oracle }
    }

    pub async fn classify(&self, utterance: &str) -> InsultKind {
        match self.oracle.classify::<InsultKind>(INSTRUCTION, utterance).await {
            Verdict::Label(InsultKind::Direct) if utterance.contains('?') => {
                log::info!("insult classified as direct, corrected to question by '?'");
                InsultKind::Question
            }
            Verdict::Label(kind) => {
                log::debug!("insult classification: {kind}");
                kind
            }
            Verdict::Unrecognized(raw) => {
                log::debug!("insult classification {raw:?} not recognised, assuming none");
                InsultKind::None
            }
            Verdict::Failed(e) => {
                log::error!("insult classification failed: {e}");
                InsultKind::None
            }
        }
    }
}
