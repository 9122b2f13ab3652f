use crate::oracle::{ClassificationOracle, Label, Verdict};
use indoc::indoc;
use std::fmt;

const INSTRUCTION: &str = indoc! {"
    You are the roleplay analysis module of Exi, a Telegram bot.
    You receive a user's message. Work out who should take the active part and who the passive one.

    - If the user asks to have something done to them ('tie me up', 'take me', 'grab me'), the bot is active and the user passive. Answer: 'active'.
    - If the user describes doing something to the bot ('I tie you up', 'I take you', 'I pin you down'), the bot is passive and the user active. Answer: 'passive'.
    - If it cannot be determined clearly, answer 'unknown'.

    Answer with exactly one word: active, passive or unknown."
};

/// Which part the bot should take in a roleplay scene.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Role {
    Active,
    Passive,
    #[default]
    Unknown,
}

impl Label for Role {
    const ALL: &'static [Self] = &[Self::Active, Self::Passive, Self::Unknown];

    fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Passive => "passive",
            Self::Unknown => "unknown",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone)]
pub struct RoleClassifier {
    oracle: ClassificationOracle,
}

impl RoleClassifier {
    pub fn new(oracle: ClassificationOracle) -> Self {
        Self { oracle }
    }

    pub async fn classify(&self, utterance: &str) -> Role {
        match self.oracle.classify::<Role>(INSTRUCTION, utterance).await {
            Verdict::Label(role) => role,
            Verdict::Unrecognized(raw) => {
                log::debug!("role {raw:?} not recognised, assuming unknown");
                Role::Unknown
            }
            Verdict::Failed(e) => {
                log::error!("role classification failed: {e}");
                Role::Unknown
            }
        }
    }
}
