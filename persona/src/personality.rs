//! Stochastic decoration of generated replies.
//!
//! Four stages run in a fixed order, each behind its own probability gate:
//! mood line, theme tease, intensity line, trailing emote.

use crate::chance::{choose, Chance, Slot};
use crate::config::PersonaConfig;
use crate::emotes::{self, EmoteTable};
use crate::state::{ConversationState, Mood};
use std::collections::HashMap;

pub const MOOD_LINE_CHANCE: f64 = 0.30;
pub const TEASE_CHANCE: f64 = 0.30;
pub const ROLEPLAY_INTENSITY_CHANCE: f64 = 0.20;
pub const ROLEPLAY_INTENSITY_AFTER: u64 = 1;
pub const CHAT_INTENSITY_CHANCE: f64 = 0.15;
pub const CHAT_INTENSITY_AFTER: u64 = 3;
pub const EMOTE_CHANCE: f64 = 0.25;

const SEPARATOR: &str = "\n\n";

#[derive(Clone, Debug, Default)]
pub struct PersonalityTables {
    pub mood_lines: HashMap<Mood, Vec<String>>,
    /// `{fetishes}` is replaced with the detected display names.
    pub teases: Vec<String>,
    pub intensity: Vec<String>,
    pub emotes: EmoteTable,
}

impl From<&PersonaConfig> for PersonalityTables {
    fn from(cfg: &PersonaConfig) -> Self {
        Self {
            mood_lines: cfg.moods.clone(),
            teases: cfg.teases.clone(),
            intensity: cfg.intensity.clone(),
            emotes: EmoteTable::new(cfg.emotes.clone()),
        }
    }
}

pub struct PersonalityPostProcessor {
    tables: PersonalityTables,
}

impl PersonalityPostProcessor {
    pub fn new(tables: PersonalityTables) -> Self {
        Self { tables }
    }

    pub fn emotes(&self) -> &EmoteTable {
        &self.tables.emotes
    }

    /// Decorate a freshly generated `reply` and count it.
    ///
    /// `themes` are display names of detected themes. A stage draws only
    /// when its preconditions hold. `reply_count` is incremented after every
    /// stage has read it.
    pub fn post(
        &self,
        reply: String,
        state: &mut ConversationState,
        roleplay: bool,
        themes: &[String],
        chance: &mut dyn Chance,
    ) -> String {
        let mut reply = reply;

        let mood_lines = self
            .tables
            .mood_lines
            .get(&state.mood())
            .map(Vec::as_slice)
            .unwrap_or_default();
        if !mood_lines.is_empty() && chance.roll(Slot::MoodLine) < MOOD_LINE_CHANCE {
            if let Some(line) = choose(chance, Slot::MoodLine, mood_lines) {
                reply.push_str(SEPARATOR);
                reply.push_str(line);
            }
        }

        if roleplay
            && !themes.is_empty()
            && !self.tables.teases.is_empty()
            && chance.roll(Slot::FetishTease) < TEASE_CHANCE
        {
            if let Some(template) = choose(chance, Slot::FetishTease, &self.tables.teases) {
                reply.push_str(SEPARATOR);
                reply.push_str(&template.replace("{fetishes}", &themes.join(", ")));
            }
        }

        reply = self.intensify(reply, state.reply_count(), roleplay, chance);

        if !self.tables.emotes.ends_with_emote(&reply)
            && chance.roll(Slot::TrailingEmote) < EMOTE_CHANCE
        {
            let glyph = self
                .tables
                .emotes
                .pick(emotes::NORMAL, chance, Slot::TrailingEmote);
            reply = emotes::decorate(&reply, glyph);
        }

        state.record_reply();
        reply
    }

    /// Roleplay escalates sooner and may prepend; plain chat only appends.
    fn intensify(&self, reply: String, count: u64, roleplay: bool, chance: &mut dyn Chance) -> String {
        let lines = &self.tables.intensity;
        if lines.is_empty() {
            return reply;
        }
        if roleplay {
            if count < ROLEPLAY_INTENSITY_AFTER
                || chance.roll(Slot::Intensity) >= ROLEPLAY_INTENSITY_CHANCE
            {
                return reply;
            }
            let Some(line) = choose(chance, Slot::Intensity, lines) else {
                return reply;
            };
            if chance.roll(Slot::IntensityPlacement) < 0.5 {
                format!("{line}{SEPARATOR}{reply}")
            } else {
                format!("{reply}{SEPARATOR}{line}")
            }
        } else {
            if count < CHAT_INTENSITY_AFTER || chance.roll(Slot::Intensity) >= CHAT_INTENSITY_CHANCE
            {
                return reply;
            }
            match choose(chance, Slot::Intensity, lines) {
                Some(line) => format!("{reply}{SEPARATOR}{line}"),
                None => reply,
            }
        }
    }
}
