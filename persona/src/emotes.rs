use crate::chance::{choose, Chance, Slot};
use std::collections::HashMap;

pub const NORMAL: &str = "NORMAL";
pub const BLUSH: &str = "BLUSH";
pub const INSULT: &str = "INSULT";

/// Emote glyphs grouped by category.
#[derive(Clone, Debug, Default)]
pub struct EmoteTable {
    categories: HashMap<String, Vec<String>>,
}

impl EmoteTable {
    pub fn new(categories: HashMap<String, Vec<String>>) -> Self {
        let categories = categories
            .into_iter()
            .map(|(k, v)| (k.to_uppercase(), v.into_iter().filter(|g| !g.is_empty()).collect()))
            .collect();
        Self { categories }
    }

    /// Random glyph of `category`; `None` for unknown or empty categories.
    pub fn pick(&self, category: &str, chance: &mut dyn Chance, slot: Slot) -> Option<&str> {
        let glyphs = self.categories.get(&category.to_uppercase())?;
        choose(chance, slot, glyphs).map(String::as_str)
    }

    /// Whether `text` (ignoring surrounding whitespace) ends with any configured glyph.
    pub fn ends_with_emote(&self, text: &str) -> bool {
        let stripped = text.trim();
        self.categories
            .values()
            .flatten()
            .any(|glyph| stripped.ends_with(glyph.as_str()))
    }
}

/// Append `glyph` after a space, trimming trailing whitespace.
pub fn decorate(text: &str, glyph: Option<&str>) -> String {
    format!("{text} {}", glyph.unwrap_or_default())
        .trim_end()
        .to_string()
}
