//! Word profiler.
//!
//! Counts stopword-filtered tokens across a room log and reports each word's
//! share of the total, most frequent first.

use std::collections::{HashMap, HashSet};
use std::io::ErrorKind;
use std::path::Path;

use crate::analysis::tokenize;
use crate::analysis::types::WordProfile;
use crate::error::{AnalysisError, AnalysisResult};
use crate::memory::log::LogStore;

/// Load a stopword list: one word per line, trimmed and lowercased, blank
/// lines ignored. Read fresh on every call.
pub fn load_stopwords(path: &Path) -> AnalysisResult<HashSet<String>> {
    let text = match std::fs::read_to_string(path) {
        Ok(t) => t,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            return Err(AnalysisError::StopwordsNotFound(path.to_path_buf()))
        }
        Err(e) => {
            return Err(AnalysisError::Io {
                path: path.to_path_buf(),
                source: e,
            })
        }
    };
    Ok(text
        .lines()
        .map(|l| l.trim().to_lowercase())
        .filter(|l| !l.is_empty())
        .collect())
}

/// Profile `texts` against an already loaded stopword set.
pub fn profile_texts<'a, I>(user_id: &str, texts: I, stopwords: &HashSet<String>) -> WordProfile
where
    I: IntoIterator<Item = &'a str>,
{
    // first-seen order, so ties stay stable after the sort
    let mut counts: Vec<(String, usize)> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut total = 0usize;

    for text in texts {
        for token in tokenize(text) {
            if stopwords.contains(&token) {
                continue;
            }
            total += 1;
            match index.get(&token) {
                Some(&i) => counts[i].1 += 1,
                None => {
                    index.insert(token.clone(), counts.len());
                    counts.push((token, 1));
                }
            }
        }
    }

    if total == 0 {
        return WordProfile::empty(user_id);
    }

    counts.sort_by(|a, b| b.1.cmp(&a.1));
    let word_freq = counts
        .into_iter()
        .map(|(word, count)| (word, round6(count as f64 / total as f64)))
        .collect();

    WordProfile {
        user_id: user_id.to_string(),
        total_words: total,
        word_freq,
    }
}

/// Profile every message in `user_id`'s log for `room`.
///
/// An empty or missing log gives an empty profile without touching the
/// stopword file. Once there is text, a missing stopword file is an error.
pub fn build_word_profile(
    store: &LogStore,
    user_id: &str,
    room: &str,
    stopwords_path: &Path,
) -> AnalysisResult<WordProfile> {
    let read = store.read_all(user_id, room)?;
    if read.nodes.iter().all(|n| n.content.trim().is_empty()) {
        return Ok(WordProfile::empty(user_id));
    }

    let stopwords = load_stopwords(stopwords_path)?;
    let profile = profile_texts(
        user_id,
        read.nodes.iter().map(|n| n.content.as_str()),
        &stopwords,
    );

    tracing::info!(
        user = %user_id,
        room = %room,
        messages = read.nodes.len(),
        skipped = read.skipped.len(),
        total_words = profile.total_words,
        distinct = profile.word_freq.len(),
        "word profile built"
    );
    Ok(profile)
}

fn round6(x: f64) -> f64 {
    (x * 1_000_000.0).round() / 1_000_000.0
}
