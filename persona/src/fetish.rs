//! Keyword-triggered theme detection.

use serde::Serialize;
use std::collections::HashMap;
use std::fmt;

/// Canonical identifier of a keyword-triggered theme.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct FetishKey(String);

impl FetishKey {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FetishKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Pure matcher over the static keyword table.
///
/// Keys are reported in the table's declared order. Keys can only be
/// produced from the table itself.
#[derive(Clone, Debug, Default)]
pub struct FetishDetector {
    triggers: Vec<(FetishKey, Vec<String>)>,
    names: HashMap<String, String>,
}

impl FetishDetector {
    pub fn new(triggers: Vec<(String, Vec<String>)>, names: HashMap<String, String>) -> Self {
        let triggers = triggers
            .into_iter()
            .map(|(key, keywords)| {
                let keywords = keywords
                    .into_iter()
                    .map(|k| k.to_lowercase())
                    .filter(|k| !k.is_empty())
                    .collect();
                (FetishKey(key), keywords)
            })
            .collect();
        Self { triggers, names }
    }

    /// Every key with at least one keyword contained in `utterance`.
    pub fn detect(&self, utterance: &str) -> Vec<FetishKey> {
        let text = utterance.to_lowercase();
        self.triggers
            .iter()
            .filter(|(_, keywords)| keywords.iter().any(|k| text.contains(k.as_str())))
            .map(|(key, _)| key.clone())
            .collect()
    }

    /// Human-readable name of `key`, or the key itself when none is configured.
    pub fn display_name<'a>(&'a self, key: &'a FetishKey) -> &'a str {
        self.names
            .get(key.as_str())
            .map(String::as_str)
            .unwrap_or(key.as_str())
    }

    pub fn display_names(&self, keys: &[FetishKey]) -> Vec<String> {
        keys.iter()
            .map(|k| self.display_name(k).to_string())
            .collect()
    }

    pub fn keys(&self) -> impl Iterator<Item = &FetishKey> {
        self.triggers.iter().map(|(k, _)| k)
    }
}
