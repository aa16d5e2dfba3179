//! Lexical analytics over room logs.
//!
//! - [`words`]: stopword-filtered relative term frequencies
//! - [`bias`]: per-user category intensity and sentiment direction
//! - [`lexicon`] / [`sentiment`]: default implementations of the scorer traits
//! - [`export`]: CSV output of the derived tables
//!
//! The scorers are injected through [`LexiconScorer`] and [`SentimentScorer`]
//! so profiling logic can run against deterministic fakes.

pub mod bias;
pub mod export;
pub mod lexicon;
pub mod sentiment;
pub mod types;
pub mod words;

use regex::Regex;
use std::collections::BTreeMap;
use std::sync::OnceLock;

pub use types::{BiasProfile, CategoryScore, Polarity, WordProfile};

/// Maps text onto a fixed set of categories.
pub trait LexiconScorer {
    /// All categories this scorer reports, in a stable order.
    fn categories(&self) -> Vec<String>;

    /// Weight per category, every category present (0.0 when absent).
    /// With `normalize`, raw hit counts are divided by the token count.
    fn analyze(&self, text: &str, normalize: bool) -> BTreeMap<String, f64>;
}

/// Scores the sentiment polarity of a text.
pub trait SentimentScorer {
    fn polarity(&self, text: &str) -> Polarity;
}

fn word_regex() -> &'static Regex {
    static WORD: OnceLock<Regex> = OnceLock::new();
    WORD.get_or_init(|| Regex::new(r"\b\w+\b").expect("word pattern is valid"))
}

/// Lowercase runs of word characters (letters, digits, underscore).
pub fn tokenize(text: &str) -> Vec<String> {
    let lowered = text.to_lowercase();
    word_regex()
        .find_iter(&lowered)
        .map(|m| m.as_str().to_string())
        .collect()
}
