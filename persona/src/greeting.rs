//! Lexical short-circuit for one-word greetings.

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;

static WORD: Lazy<Regex> = Lazy::new(|| Regex::new(r"\w+").expect("word pattern is valid"));

pub const DEFAULT_WORDS: &[&str] = &[
    "привет", "ку", "здаров", "йоу", "здравствуй", "кулити", "хай", "куку", "прив", "hi",
    "hello", "hey", "yo", "sup", "yoho",
];

pub const DEFAULT_PREFIXES: &[&str] = &["прив", "здаров", "здоров", "yo", "sup"];

#[derive(Clone, Debug)]
pub struct GreetingDetector {
    words: HashSet<String>,
    prefixes: Vec<String>,
}

impl Default for GreetingDetector {
    fn default() -> Self {
        Self::new(
            DEFAULT_WORDS.iter().copied(),
            DEFAULT_PREFIXES.iter().copied(),
        )
    }
}

impl GreetingDetector {
    pub fn new<W, P>(words: W, prefixes: P) -> Self
    where
        W: IntoIterator,
        W::Item: AsRef<str>,
        P: IntoIterator,
        P::Item: AsRef<str>,
    {
        Self {
            words: words
                .into_iter()
                .map(|w| w.as_ref().to_lowercase())
                .collect(),
            prefixes: prefixes
                .into_iter()
                .map(|p| p.as_ref().to_lowercase())
                .filter(|p| !p.is_empty())
                .collect(),
        }
    }

    /// Whether any word of `text` looks like a greeting.
    pub fn is_greeting(&self, text: &str) -> bool {
        let lowered = text.to_lowercase();
        WORD.find_iter(&lowered).any(|m| {
            let word = m.as_str();
            self.words.contains(word) || self.prefixes.iter().any(|p| word.starts_with(p.as_str()))
        })
    }

    /// A greeting that is the whole message: a single whitespace-separated token.
    pub fn short_circuits(&self, text: &str) -> bool {
        text.split_whitespace().count() == 1 && self.is_greeting(text)
    }
}
