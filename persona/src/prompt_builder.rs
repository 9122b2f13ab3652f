use crate::config::PersonaConfig;
use crate::fetish::FetishDetector;
use crate::role::Role;
use crate::types::Classification;
use once_cell::sync::Lazy;
use regex::Regex;
use std::sync::Arc;

static ACTION_SPAN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\*[^*]+\*").expect("action span pattern is valid"));

/// Whether `utterance` contains a `*starred*` in-character action.
pub fn is_roleplay(utterance: &str) -> bool {
    ACTION_SPAN.is_match(utterance)
}

/// System prompt chosen for one message.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PromptContext {
    pub prompt: String,
    pub roleplay: bool,
}

/// Static text the composer stitches together.
#[derive(Clone, Debug, Default)]
pub struct PromptTemplates {
    pub base: String,
    pub roleplay: String,
    /// `{fetishes}` is replaced with the detected display names.
    pub fetish_clause: String,
    pub embodiment: String,
    pub active_role: String,
    pub passive_role: String,
}

impl From<&PersonaConfig> for PromptTemplates {
    fn from(cfg: &PersonaConfig) -> Self {
        Self {
            base: cfg.system_prompt.clone(),
            roleplay: cfg.rp_prompt.clone(),
            fetish_clause: cfg.fetish_clause.clone(),
            embodiment: cfg.embodiment.clone(),
            active_role: cfg.active_role.clone(),
            passive_role: cfg.passive_role.clone(),
        }
    }
}

/// Builds the system prompt from the templates and classification results.
///
/// Roleplay prompts append, in this order: the theme clause (only when
/// themes were detected), the embodiment rules (always), and the role
/// directive (only for a known role).
#[derive(Clone)]
pub struct PromptComposer {
    templates: PromptTemplates,
    fetishes: Arc<FetishDetector>,
}

impl PromptComposer {
    pub fn new(templates: PromptTemplates, fetishes: Arc<FetishDetector>) -> Self {
        Self {
            templates,
            fetishes,
        }
    }

    pub fn compose(&self, classification: &Classification, roleplay: bool) -> PromptContext {
        if !roleplay {
            return PromptContext {
                prompt: self.templates.base.clone(),
                roleplay,
            };
        }

        let mut out = self.templates.roleplay.clone();

        if !classification.fetishes.is_empty() {
            let names = self.fetishes.display_names(&classification.fetishes).join(", ");
            out.push('\n');
            out.push_str(&self.templates.fetish_clause.replace("{fetishes}", &names));
        }

        out.push('\n');
        out.push_str(&self.templates.embodiment);

        let directive = match classification.role {
            Role::Active => Some(&self.templates.active_role),
            Role::Passive => Some(&self.templates.passive_role),
            Role::Unknown => None,
        };
        if let Some(directive) = directive {
            out.push('\n');
            out.push_str(directive);
        }

        PromptContext {
            prompt: out,
            roleplay,
        }
    }
}
