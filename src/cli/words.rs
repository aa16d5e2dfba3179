//! CLI `words` command: print or export a word frequency profile.

use anyhow::{Context, Result};
use std::path::PathBuf;

use zidek::analysis::export::{export_to, word_profile_filename, write_word_profile};
use zidek::analysis::words::build_word_profile;
use zidek::config::ZidekConfig;
use zidek::memory::log::LogStore;

const PRINT_LIMIT: usize = 25;

pub fn words(
    config: &ZidekConfig,
    user: &str,
    room: Option<&str>,
    csv: Option<Option<PathBuf>>,
) -> Result<()> {
    let room = super::room_or_default(config, room);
    let store = LogStore::from_config(config);
    let stopwords = config.resolved_stopwords_path();

    let profile = build_word_profile(&store, user, room, &stopwords)
        .with_context(|| format!("failed to build word profile for {user} in {room}"))?;

    if let Some(target) = csv {
        let path = target.unwrap_or_else(|| PathBuf::from(word_profile_filename(user)));
        export_to(&path, |out| write_word_profile(out, &profile))?;
        println!("Word profile written to {}", path.display());
        return Ok(());
    }

    if profile.is_empty() {
        println!("No words to profile for {user} in {room}.");
        return Ok(());
    }

    println!("Word Profile: {user} ({room})");
    println!("{}", "=".repeat(40));
    println!("  Total words:     {}", profile.total_words);
    println!("  Distinct words:  {}", profile.word_freq.len());
    println!();
    for (word, freq) in profile.word_freq.iter().take(PRINT_LIMIT) {
        println!("  {:<20} {:.4}", word, freq);
    }
    if profile.word_freq.len() > PRINT_LIMIT {
        println!("  ... {} more", profile.word_freq.len() - PRINT_LIMIT);
    }
    Ok(())
}
