//! The message pipeline: classify, compose, generate, decorate, split.

use crate::chance::{choose, Chance, Slot};
use crate::chunker::{split_message, TELEGRAM_LIMIT};
use crate::config::PersonaConfig;
use crate::emotes;
use crate::fetish::FetishDetector;
use crate::greeting::GreetingDetector;
use crate::insult::{InsultClassifier, InsultKind};
use crate::mood::MoodClassifier;
use crate::oracle::ClassificationOracle;
use crate::personality::{PersonalityPostProcessor, PersonalityTables};
use crate::prompt_builder::{is_roleplay, PromptComposer, PromptTemplates};
use crate::generator::ReplyGenerator;
use crate::role::RoleClassifier;
use crate::state::ConversationState;
use crate::types::{Classification, Reply, ReplyKind};
use llm::LLMClient;
use std::sync::Arc;

/// Canned lines for the short-circuit paths.
#[derive(Clone, Debug, Default)]
struct CannedLines {
    greetings: Vec<String>,
    insults: Vec<String>,
    question_insults: Vec<String>,
}

pub struct Responder {
    greetings: GreetingDetector,
    insults: InsultClassifier,
    moods: MoodClassifier,
    fetishes: Arc<FetishDetector>,
    roles: RoleClassifier,
    composer: PromptComposer,
    generator: ReplyGenerator,
    personality: PersonalityPostProcessor,
    canned: CannedLines,
    fallback: String,
    limit: usize,
}

impl Responder {
    /// Wire every stage to the same model behind `client`.
    pub fn new(config: &PersonaConfig, client: Arc<dyn LLMClient>, model: impl Into<String>) -> Self {
        let model = model.into();
        let oracle = ClassificationOracle::new(client.clone(), model.clone());
        let fetishes = Arc::new(FetishDetector::new(
            config.fetish_triggers.clone(),
            config.fetish_names.clone(),
        ));
        Self {
            greetings: GreetingDetector::new(&config.greeting_words, &config.greeting_prefixes),
            insults: InsultClassifier::new(oracle.clone()),
            moods: MoodClassifier::new(oracle.clone()),
            roles: RoleClassifier::new(oracle),
            composer: PromptComposer::new(PromptTemplates::from(config), fetishes.clone()),
            fetishes,
            generator: ReplyGenerator::new(client, model),
            personality: PersonalityPostProcessor::new(PersonalityTables::from(config)),
            canned: CannedLines {
                greetings: config.greetings.clone(),
                insults: config.insults.clone(),
                question_insults: config.question_insult_replies.clone(),
            },
            fallback: config.fallback.clone(),
            limit: TELEGRAM_LIMIT,
        }
    }

    /// Override the outbound size limit.
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit.max(1);
        self
    }

    /// Handle one inbound text and return the parts to send.
    pub async fn respond(
        &self,
        state: &mut ConversationState,
        chance: &mut dyn Chance,
        utterance: &str,
    ) -> Reply {
        if self.greetings.short_circuits(utterance) {
            let chunks = self.canned(state, chance, &self.canned.greetings, None);
            return Reply {
                kind: ReplyKind::Greeting,
                chunks,
                mood_shift: None,
            };
        }

        let insult = self.insults.classify(utterance).await;
        let chunks = match insult {
            InsultKind::Question => Some(self.canned(
                state,
                chance,
                &self.canned.question_insults,
                Some(emotes::BLUSH),
            )),
            InsultKind::Direct => Some(self.canned(
                state,
                chance,
                &self.canned.insults,
                Some(emotes::INSULT),
            )),
            InsultKind::General => Some(self.canned(state, chance, &self.canned.insults, None)),
            InsultKind::None => None,
        };
        if let Some(chunks) = chunks {
            return Reply {
                kind: ReplyKind::Insult(insult),
                chunks,
                mood_shift: None,
            };
        }

        let roleplay = is_roleplay(utterance);
        let (mood, role) = tokio::join!(
            self.moods.classify(utterance, state),
            self.roles.classify(utterance)
        );
        log::info!("mood for this message: {}", mood.mood);

        let fetishes = self.fetishes.detect(utterance);
        let themes = self.fetishes.display_names(&fetishes);
        if fetishes.is_empty() {
            log::info!("no themes detected");
        } else {
            let keys: Vec<&str> = fetishes.iter().map(|k| k.as_str()).collect();
            log::info!(
                "themes detected: {} -> {} | bot role: {role}",
                keys.join(", "),
                themes.join(", ")
            );
        }

        let classification = Classification {
            insult,
            mood: mood.mood,
            fetishes,
            role,
        };
        let context = self.composer.compose(&classification, roleplay);

        match self.generator.generate(&context, utterance).await {
            Ok(text) => {
                let text = self.personality.post(text, state, roleplay, &themes, chance);
                Reply {
                    kind: ReplyKind::Generated,
                    chunks: split_message(&text, self.limit),
                    mood_shift: mood.shift,
                }
            }
            Err(e) => {
                log::error!("reply generation failed: {e}");
                Reply {
                    kind: ReplyKind::Fallback,
                    chunks: split_message(&self.fallback, self.limit),
                    mood_shift: mood.shift,
                }
            }
        }
    }

    fn canned(
        &self,
        state: &mut ConversationState,
        chance: &mut dyn Chance,
        lines: &[String],
        emote: Option<&str>,
    ) -> Vec<String> {
        state.record_reply();
        let Some(line) = choose(chance, Slot::CannedReply, lines) else {
            log::warn!("no canned lines configured for this reply");
            return Vec::new();
        };
        let text = match emote {
            Some(category) => {
                let glyph = self
                    .personality
                    .emotes()
                    .pick(category, chance, Slot::CannedReply);
                emotes::decorate(line, glyph)
            }
            None => line.clone(),
        };
        split_message(&text, self.limit)
    }
}
