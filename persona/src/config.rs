//! Static persona configuration loaded once at startup.
//!
//! The configuration lives in a directory of JSON files. Any missing file,
//! missing required key or malformed document aborts loading; optional keys
//! fall back to built-in defaults.

use crate::state::Mood;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("cannot parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Read and deserialize `<dir>/<file>`.
pub fn load_json<T: DeserializeOwned>(dir: &Path, file: &str) -> Result<T, ConfigError> {
    let path = dir.join(file);
    let raw = std::fs::read_to_string(&path).map_err(|source| {
        log::error!("config file {} not found", path.display());
        ConfigError::Io {
            path: path.clone(),
            source,
        }
    })?;
    serde_json::from_str(&raw).map_err(|source| {
        log::error!("malformed JSON in {}: {source}", path.display());
        ConfigError::Parse { path, source }
    })
}

/// A prompt given either as one string or as a list of fragments.
#[derive(Clone, Debug, Deserialize)]
#[serde(untagged)]
enum TextBlock {
    One(String),
    Lines(Vec<String>),
}

impl TextBlock {
    fn joined(self) -> String {
        match self {
            TextBlock::One(s) => s,
            TextBlock::Lines(lines) => lines.join(" "),
        }
    }
}

pub const DEFAULT_FALLBACK: &str = "Bzz, something in the toaster just broke... ≧◡≦";

pub const DEFAULT_FETISH_CLAUSE: &str =
    "⚡ This message touches on these themes: {fetishes}. Play them out in the roleplay openly and in detail.";

pub const DEFAULT_EMBODIMENT: &str = "⚠️ IMPORTANT: never call Exi's body 'mechanical'. \
Exi's body is synthetic and almost alive. Use 'synthetic muscles' or 'synthetic fur', \
but mostly just 'hands', 'legs', 'paws', 'fingers'. Do not describe removing a casing; \
describe clothes or body movement instead. The only technical exceptions are the visor, \
internal sensors and cooling fans.\n\n\
👕 Exi's default outfit is a purple t-shirt. Exi may take off or change clothes during \
the roleplay if the user initiates it.";

pub const DEFAULT_ACTIVE_ROLE: &str = "⚡ In this roleplay Exi plays the active partner.";
pub const DEFAULT_PASSIVE_ROLE: &str = "⚡ In this roleplay Exi plays the passive partner.";

pub const DEFAULT_TEASES: &[&str] = &[
    "Mmm, looks like you're into {fetishes}… ^w^",
    "Ooh, so that's your thing: {fetishes} >///<",
    "You really get going over {fetishes}, don't you? UwU",
    "Heh, I love playing with {fetishes} ;3",
];

fn default_fallback() -> String {
    DEFAULT_FALLBACK.into()
}

fn default_teases() -> Vec<String> {
    DEFAULT_TEASES.iter().map(|s| s.to_string()).collect()
}

fn default_greeting_words() -> Vec<String> {
    crate::greeting::DEFAULT_WORDS
        .iter()
        .map(|s| s.to_string())
        .collect()
}

fn default_greeting_prefixes() -> Vec<String> {
    crate::greeting::DEFAULT_PREFIXES
        .iter()
        .map(|s| s.to_string())
        .collect()
}

#[derive(Deserialize)]
struct MoodFile {
    #[serde(rename = "MOODS")]
    moods: HashMap<Mood, Vec<String>>,
}

#[derive(Deserialize)]
struct PersonalityFile {
    #[serde(rename = "GREETINGS")]
    greetings: Vec<String>,
    #[serde(rename = "HORNY")]
    intensity: Vec<String>,
    #[serde(rename = "INSULTS")]
    insults: Vec<String>,
    #[serde(rename = "TEASES", default = "default_teases")]
    teases: Vec<String>,
    #[serde(rename = "GREETING_WORDS", default = "default_greeting_words")]
    greeting_words: Vec<String>,
    #[serde(rename = "GREETING_PREFIXES", default = "default_greeting_prefixes")]
    greeting_prefixes: Vec<String>,
    #[serde(rename = "FALLBACK", default = "default_fallback")]
    fallback: String,
}

#[derive(Deserialize)]
struct SystemPromptFile {
    #[serde(rename = "SYSTEM_PROMPT")]
    system_prompt: TextBlock,
}

#[derive(Deserialize)]
struct RoleplayFile {
    #[serde(rename = "RP_PROMPT")]
    rp_prompt: TextBlock,
    #[serde(rename = "FETISH_CLAUSE")]
    fetish_clause: Option<String>,
    #[serde(rename = "EMBODIMENT")]
    embodiment: Option<TextBlock>,
    #[serde(rename = "ACTIVE_ROLE")]
    active_role: Option<String>,
    #[serde(rename = "PASSIVE_ROLE")]
    passive_role: Option<String>,
}

#[derive(Deserialize)]
struct StartFile {
    #[serde(rename = "START_MESSAGES")]
    start_messages: Vec<String>,
}

#[derive(Deserialize)]
struct EmoteFile {
    #[serde(rename = "CATEGORIES")]
    categories: HashMap<String, Vec<String>>,
}

#[derive(Deserialize)]
struct QuestionInsultFile {
    #[serde(rename = "QUESTION_INSULT_REPLIES", default)]
    replies: Vec<String>,
}

/// Every static table the persona needs, read-only after startup.
#[derive(Clone, Debug, Default)]
pub struct PersonaConfig {
    /// Keyword table in declared order.
    pub fetish_triggers: Vec<(String, Vec<String>)>,
    pub fetish_names: HashMap<String, String>,
    pub moods: HashMap<Mood, Vec<String>>,
    pub greetings: Vec<String>,
    /// Escalating lines injected by the intensity stage.
    pub intensity: Vec<String>,
    pub insults: Vec<String>,
    pub question_insult_replies: Vec<String>,
    /// Tease templates; `{fetishes}` is replaced with display names.
    pub teases: Vec<String>,
    pub greeting_words: Vec<String>,
    pub greeting_prefixes: Vec<String>,
    pub fallback: String,
    pub system_prompt: String,
    pub rp_prompt: String,
    /// Template; `{fetishes}` is replaced with display names.
    pub fetish_clause: String,
    pub embodiment: String,
    pub active_role: String,
    pub passive_role: String,
    pub start_messages: Vec<String>,
    /// Emote glyphs by upper-case category name.
    pub emotes: HashMap<String, Vec<String>>,
}

impl PersonaConfig {
    pub fn load(dir: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let dir = dir.as_ref();

        let triggers: serde_json::Map<String, serde_json::Value> =
            load_json(dir, "fetishes_triggers.json")?;
        let mut fetish_triggers = Vec::with_capacity(triggers.len());
        for (key, value) in triggers {
            let keywords: Vec<String> =
                serde_json::from_value(value).map_err(|source| ConfigError::Parse {
                    path: dir.join("fetishes_triggers.json"),
                    source,
                })?;
            fetish_triggers.push((key, keywords));
        }
        let fetish_names: HashMap<String, String> = load_json(dir, "fetish_names.json")?;
        let moods: MoodFile = load_json(dir, "mood.json")?;
        let personality: PersonalityFile = load_json(dir, "personality.json")?;
        let system: SystemPromptFile = load_json(dir, "system_prompt.json")?;
        let roleplay: RoleplayFile = load_json(dir, "rp_prompt.json")?;
        let start: StartFile = load_json(dir, "start_messages.json")?;
        let emotes: EmoteFile = load_json(dir, "emotes.json")?;
        let question: QuestionInsultFile = load_json(dir, "question_insult_replies.json")?;

        log::info!(
            "persona config loaded from {}: {} themes, {} greetings",
            dir.display(),
            fetish_triggers.len(),
            personality.greetings.len()
        );

        Ok(Self {
            fetish_triggers,
            fetish_names,
            moods: moods.moods,
            greetings: personality.greetings,
            intensity: personality.intensity,
            insults: personality.insults,
            question_insult_replies: question.replies,
            teases: personality.teases,
            greeting_words: personality.greeting_words,
            greeting_prefixes: personality.greeting_prefixes,
            fallback: personality.fallback,
            system_prompt: system.system_prompt.joined(),
            rp_prompt: roleplay.rp_prompt.joined(),
            fetish_clause: roleplay
                .fetish_clause
                .unwrap_or_else(|| DEFAULT_FETISH_CLAUSE.into()),
            embodiment: roleplay
                .embodiment
                .map(TextBlock::joined)
                .unwrap_or_else(|| DEFAULT_EMBODIMENT.into()),
            active_role: roleplay
                .active_role
                .unwrap_or_else(|| DEFAULT_ACTIVE_ROLE.into()),
            passive_role: roleplay
                .passive_role
                .unwrap_or_else(|| DEFAULT_PASSIVE_ROLE.into()),
            start_messages: start.start_messages,
            emotes: emotes
                .categories
                .into_iter()
                .map(|(k, v)| (k.to_uppercase(), v))
                .collect(),
        })
    }
}
