#![allow(dead_code)]

use std::collections::{BTreeMap, HashMap, HashSet};
use std::io::Write;
use std::path::Path;

use tempfile::TempDir;
use zidek::analysis::{LexiconScorer, Polarity, SentimentScorer};
use zidek::memory::log::LogStore;
use zidek::memory::types::MessageNode;

/// A log store rooted in a fresh temp directory. Keep the `TempDir` alive.
pub fn test_store() -> (TempDir, LogStore) {
    let tmp = TempDir::new().unwrap();
    let store = LogStore::new(tmp.path().join("memory_logs"));
    (tmp, store)
}

/// Minimal record with an explicit embedding and timestamp.
pub fn message(user_id: &str, content: &str, embedding: Vec<f32>, timestamp: i64) -> MessageNode {
    MessageNode {
        id: zidek::memory::node::message_id(content),
        user_id: user_id.to_string(),
        username: format!("name-{user_id}"),
        room: "room_1".to_string(),
        timestamp,
        content: content.to_string(),
        embedding,
        tags: Default::default(),
        signal_score: 0.8,
    }
}

/// Append raw lines to a file, bypassing the store. Used to plant damage.
pub fn append_raw(path: &Path, lines: &[&str]) {
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    let mut file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .unwrap();
    for line in lines {
        writeln!(file, "{line}").unwrap();
    }
}

pub fn write_stopwords(dir: &Path, words: &[&str]) -> std::path::PathBuf {
    let path = dir.join("stopwords.txt");
    std::fs::write(&path, words.join("\n")).unwrap();
    path
}

/// Lexicon where each category matches a fixed word set.
pub struct FakeLexicon {
    pub categories: BTreeMap<String, HashSet<String>>,
}

impl FakeLexicon {
    pub fn new(categories: &[(&str, &[&str])]) -> Self {
        Self {
            categories: categories
                .iter()
                .map(|(c, words)| (c.to_string(), words.iter().map(|w| w.to_string()).collect()))
                .collect(),
        }
    }
}

impl LexiconScorer for FakeLexicon {
    fn categories(&self) -> Vec<String> {
        self.categories.keys().cloned().collect()
    }

    fn analyze(&self, text: &str, normalize: bool) -> BTreeMap<String, f64> {
        let tokens: Vec<String> = text.split_whitespace().map(str::to_lowercase).collect();
        self.categories
            .iter()
            .map(|(c, words)| {
                let hits = tokens.iter().filter(|t| words.contains(*t)).count() as f64;
                let weight = if normalize && !tokens.is_empty() {
                    hits / tokens.len() as f64
                } else {
                    hits
                };
                (c.clone(), weight)
            })
            .collect()
    }
}

/// Sentiment looked up by exact text; unknown text is neutral.
#[derive(Default)]
pub struct FakeSentiment {
    pub compounds: HashMap<String, f64>,
}

impl FakeSentiment {
    pub fn new(entries: &[(&str, f64)]) -> Self {
        Self {
            compounds: entries.iter().map(|(t, c)| (t.to_string(), *c)).collect(),
        }
    }
}

impl SentimentScorer for FakeSentiment {
    fn polarity(&self, text: &str) -> Polarity {
        Polarity {
            compound: self.compounds.get(text).copied().unwrap_or(0.0),
            ..Polarity::default()
        }
    }
}
