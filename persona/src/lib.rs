//! Exi's conversational core.
//!
//! A [`Responder`] takes one inbound text through greeting detection, insult
//! classification, mood and role classification, theme detection, prompt
//! composition, reply generation and personality decoration, then splits the
//! result into Telegram-sized parts. Session counters live in
//! [`ConversationState`]; every random decision goes through [`Chance`].

pub mod chance;
pub mod chunker;
pub mod config;
pub mod emotes;
pub mod fetish;
pub mod generator;
pub mod greeting;
pub mod insult;
pub mod mood;
pub mod oracle;
pub mod personality;
pub mod prompt_builder;
pub mod responder;
pub mod role;
pub mod state;
pub mod types;

pub use chance::{Chance, RandomChance, ScriptedChance, Slot};
pub use chunker::{split_message, TELEGRAM_LIMIT};
pub use config::{load_json, ConfigError, PersonaConfig};
pub use fetish::{FetishDetector, FetishKey};
pub use generator::{GenerationError, ReplyGenerator};
pub use greeting::GreetingDetector;
pub use insult::{InsultClassifier, InsultKind};
pub use mood::{MoodClassifier, MoodUpdate};
pub use personality::PersonalityPostProcessor;
pub use prompt_builder::{PromptComposer, PromptContext};
pub use responder::Responder;
pub use role::{Role, RoleClassifier};
pub use state::{ConversationState, Mood, MoodShift};
pub use types::{Classification, Inbound, Reply, ReplyKind};
