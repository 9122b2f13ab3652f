//! Session state shared by every message the bot handles.

use crate::oracle::Label;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// Coarse affect of the bot, used to pick supplementary phrases.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mood {
    Sweet,
    Horny,
    Angry,
    #[default]
    Playful,
}

impl Label for Mood {
    const ALL: &'static [Self] = &[Self::Sweet, Self::Horny, Self::Angry, Self::Playful];

    fn as_str(self) -> &'static str {
        match self {
            Self::Sweet => "sweet",
            Self::Horny => "horny",
            Self::Angry => "angry",
            Self::Playful => "playful",
        }
    }
}

impl fmt::Display for Mood {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Emitted whenever the stored mood changes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MoodShift {
    pub from: Mood,
    pub to: Mood,
}

/// Process-scoped conversation state.
///
/// `reply_count` only ever grows; it is reset by restarting the process.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationState {
    mood: Mood,
    reply_count: u64,
    known_users: BTreeSet<i64>,
}

impl ConversationState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Restore state from the persisted user registry.
    pub fn with_users(users: impl IntoIterator<Item = i64>) -> Self {
        Self {
            known_users: users.into_iter().collect(),
            ..Self::default()
        }
    }

    pub fn mood(&self) -> Mood {
        self.mood
    }

    /// Store `mood`, returning the transition if it differs from the current one.
    pub fn set_mood(&mut self, mood: Mood) -> Option<MoodShift> {
        let from = self.mood;
        if from == mood {
            return None;
        }
        self.mood = mood;
        Some(MoodShift { from, to: mood })
    }

    pub fn reply_count(&self) -> u64 {
        self.reply_count
    }

    pub fn record_reply(&mut self) {
        self.reply_count = self.reply_count.saturating_add(1);
    }

    /// Returns `true` when `user` was not known before.
    pub fn register_user(&mut self, user: i64) -> bool {
        self.known_users.insert(user)
    }

    pub fn is_known(&self, user: i64) -> bool {
        self.known_users.contains(&user)
    }

    pub fn known_users(&self) -> impl Iterator<Item = i64> + '_ {
        self.known_users.iter().copied()
    }

    pub fn user_count(&self) -> usize {
        self.known_users.len()
    }
}
