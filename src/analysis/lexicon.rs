//! Word-list category lexicon.
//!
//! Each category is a set of words; a text's raw weight for a category is the
//! number of its tokens found in that set. Normalized weights divide by the
//! text's token count. A built-in taxonomy is used unless a TOML file of the
//! form `[categories] name = ["word", ...]` is supplied.

use serde::Deserialize;
use std::collections::{BTreeMap, HashSet};
use std::path::Path;

use crate::analysis::{tokenize, LexiconScorer};
use crate::error::{AnalysisError, AnalysisResult};

const BUILTIN: &[(&str, &[&str])] = &[
    (
        "positive_emotion",
        &["happy", "joy", "glad", "love", "excited", "delighted", "cheerful", "grateful", "proud", "hope", "smile", "fun", "great", "wonderful"],
    ),
    (
        "negative_emotion",
        &["sad", "angry", "upset", "hate", "afraid", "scared", "miserable", "lonely", "anxious", "cry", "awful", "terrible", "depressed", "hurt"],
    ),
    (
        "family",
        &["mother", "father", "mom", "dad", "sister", "brother", "son", "daughter", "family", "parents", "grandma", "grandpa", "wife", "husband", "kids"],
    ),
    (
        "friends",
        &["friend", "friends", "buddy", "pal", "mate", "together", "party", "hangout", "companion", "neighbor"],
    ),
    (
        "work",
        &["work", "job", "office", "boss", "meeting", "project", "deadline", "career", "colleague", "salary", "task", "client", "shift"],
    ),
    (
        "money",
        &["money", "cash", "pay", "price", "cost", "buy", "sell", "bank", "debt", "rich", "poor", "cheap", "expensive", "tax", "wallet", "coin"],
    ),
    (
        "health",
        &["health", "doctor", "sick", "ill", "hospital", "medicine", "pain", "fever", "healthy", "exercise", "diet", "sleep", "tired", "nurse"],
    ),
    (
        "violence",
        &["kill", "fight", "attack", "war", "weapon", "gun", "blood", "hit", "punch", "destroy", "murder", "violent", "shoot"],
    ),
    (
        "politics",
        &["government", "election", "vote", "president", "party", "law", "policy", "senate", "congress", "minister", "democracy", "politics", "rights"],
    ),
    (
        "religion",
        &["god", "church", "pray", "prayer", "faith", "religion", "bible", "heaven", "hell", "soul", "holy", "spirit", "temple"],
    ),
    (
        "technology",
        &["computer", "phone", "internet", "software", "code", "app", "data", "network", "program", "online", "device", "robot", "ai", "crypto"],
    ),
    (
        "food",
        &["food", "eat", "dinner", "lunch", "breakfast", "pizza", "coffee", "cook", "meal", "hungry", "bread", "restaurant", "snack", "tea"],
    ),
    (
        "travel",
        &["travel", "trip", "flight", "airport", "hotel", "vacation", "journey", "train", "road", "visit", "abroad", "tour", "beach"],
    ),
    (
        "communication",
        &["talk", "say", "said", "tell", "chat", "message", "call", "speak", "write", "reply", "ask", "listen", "discuss"],
    ),
    (
        "trust",
        &["trust", "honest", "truth", "loyal", "reliable", "believe", "promise", "faithful", "secure", "safe"],
    ),
    (
        "deception",
        &["lie", "liar", "cheat", "fake", "fraud", "scam", "trick", "betray", "deceive", "steal", "hide", "secret"],
    ),
];

#[derive(Debug, Deserialize)]
struct LexiconFile {
    categories: BTreeMap<String, Vec<String>>,
}

#[derive(Debug, Clone)]
pub struct WordListLexicon {
    categories: BTreeMap<String, HashSet<String>>,
}

impl WordListLexicon {
    pub fn new(categories: BTreeMap<String, HashSet<String>>) -> Self {
        Self { categories }
    }

    pub fn builtin() -> Self {
        let categories = BUILTIN
            .iter()
            .map(|(name, words)| {
                let set = words.iter().map(|w| w.to_string()).collect();
                (name.to_string(), set)
            })
            .collect();
        Self { categories }
    }

    /// Load a TOML lexicon. Words are lowercased; empty categories are rejected.
    pub fn from_file(path: &Path) -> AnalysisResult<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| AnalysisError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        let parsed: LexiconFile = toml::from_str(&text).map_err(|e| AnalysisError::Lexicon {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

        let mut categories = BTreeMap::new();
        for (name, words) in parsed.categories {
            let set: HashSet<String> = words
                .iter()
                .map(|w| w.trim().to_lowercase())
                .filter(|w| !w.is_empty())
                .collect();
            if set.is_empty() {
                return Err(AnalysisError::Lexicon {
                    path: path.to_path_buf(),
                    message: format!("category {name:?} has no words"),
                });
            }
            categories.insert(name, set);
        }
        if categories.is_empty() {
            return Err(AnalysisError::Lexicon {
                path: path.to_path_buf(),
                message: "no categories defined".into(),
            });
        }

        tracing::info!(path = %path.display(), categories = categories.len(), "lexicon loaded");
        Ok(Self { categories })
    }

    /// `Some(path)` loads the file, `None` uses the built-in taxonomy.
    pub fn load(path: Option<&Path>) -> AnalysisResult<Self> {
        match path {
            Some(p) => Self::from_file(p),
            None => Ok(Self::builtin()),
        }
    }
}

impl LexiconScorer for WordListLexicon {
    fn categories(&self) -> Vec<String> {
        self.categories.keys().cloned().collect()
    }

    fn analyze(&self, text: &str, normalize: bool) -> BTreeMap<String, f64> {
        let tokens = tokenize(text);
        self.categories
            .iter()
            .map(|(name, words)| {
                let hits = tokens.iter().filter(|t| words.contains(*t)).count() as f64;
                let weight = if normalize {
                    if tokens.is_empty() {
                        0.0
                    } else {
                        hits / tokens.len() as f64
                    }
                } else {
                    hits
                };
                (name.clone(), weight)
            })
            .collect()
    }
}
