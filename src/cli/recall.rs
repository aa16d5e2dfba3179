//! CLI `recall` command: rank stored messages by similarity to a text.

use anyhow::{Context, Result};

use zidek::config::ZidekConfig;
use zidek::embedding;
use zidek::memory::log::LogStore;
use zidek::memory::recall::recall_text;

pub fn recall(
    config: &ZidekConfig,
    user: &str,
    room: Option<&str>,
    top: Option<usize>,
    text: &str,
) -> Result<()> {
    let room = super::room_or_default(config, room);
    let top = top.unwrap_or(config.recall.default_top_n);
    let store = LogStore::from_config(config);
    let embedder = embedding::create_provider(&config.embedding)?;

    let path = store.log_path(user, room)?;
    let result = recall_text(&path, text, embedder.as_ref(), top)
        .with_context(|| format!("recall failed for {}", path.display()))?;

    if result.hits.is_empty() {
        println!("No messages to recall in {room}.");
    }
    for (rank, hit) in result.hits.iter().enumerate() {
        println!(
            "{:>2}. [{:+.4}] {} {}",
            rank + 1,
            hit.similarity,
            hit.node.id,
            hit.node.content
        );
    }
    if !result.skipped.is_empty() {
        eprintln!(
            "warning: {} record(s) could not be compared",
            result.skipped.len()
        );
    }
    Ok(())
}
