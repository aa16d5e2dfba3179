//! Derived analytics records. None of these are persisted unless exported.

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use std::collections::BTreeMap;

/// Relative term frequencies for one user's room log.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WordProfile {
    pub user_id: String,
    /// Qualifying (non-stopword) tokens counted.
    pub total_words: usize,
    /// Word → share of `total_words` (6 decimals), most frequent first;
    /// equal counts keep first-seen order.
    #[serde(serialize_with = "ordered_map")]
    pub word_freq: Vec<(String, f64)>,
}

impl WordProfile {
    pub fn empty(user_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            total_words: 0,
            word_freq: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.total_words == 0
    }

    pub fn frequency(&self, word: &str) -> Option<f64> {
        self.word_freq
            .iter()
            .find(|(w, _)| w == word)
            .map(|(_, f)| *f)
    }
}

fn ordered_map<S: Serializer>(entries: &[(String, f64)], s: S) -> Result<S::Ok, S::Error> {
    let mut map = s.serialize_map(Some(entries.len()))?;
    for (word, freq) in entries {
        map.serialize_entry(word, freq)?;
    }
    map.end()
}

/// Mean normalized lexicon weight per category for one user (or an average
/// across users).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BiasProfile {
    pub user_id: String,
    /// Messages (or, for averages, user profiles) the means were taken over.
    pub samples: usize,
    pub means: BTreeMap<String, f64>,
}

impl BiasProfile {
    pub fn empty(user_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            samples: 0,
            means: BTreeMap::new(),
        }
    }

    /// No messages contributed; there is nothing to render.
    pub fn is_empty(&self) -> bool {
        self.samples == 0
    }
}

/// One row of a ranked bias report.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryScore {
    pub category: String,
    pub intensity: f64,
    /// Mean compound sentiment of the messages touching this category.
    /// `None` when no message touched it.
    pub sentiment: Option<f64>,
}

/// Sentiment scores of one text. `compound` is in `[-1, 1]`; the other three
/// are proportions summing to ~1 (or all zero for empty text).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Polarity {
    pub neg: f64,
    pub neu: f64,
    pub pos: f64,
    pub compound: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn word_freq_serializes_in_rank_order() {
        let profile = WordProfile {
            user_id: "u1".into(),
            total_words: 3,
            word_freq: vec![("zebra".into(), 0.666667), ("apple".into(), 0.333333)],
        };
        let json = serde_json::to_string(&profile).unwrap();
        assert!(json.contains(r#""word_freq":{"zebra":0.666667,"apple":0.333333}"#));
    }

    #[test]
    fn empty_profiles_report_no_data() {
        assert!(WordProfile::empty("u").is_empty());
        assert!(BiasProfile::empty("u").is_empty());
        assert_eq!(WordProfile::empty("u").frequency("x"), None);
    }
}
