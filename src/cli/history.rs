//! CLI `history` command: print a room log in timestamp order.

use anyhow::{Context, Result};
use chrono::{DateTime, Local};

use zidek::config::ZidekConfig;
use zidek::embedding;
use zidek::memory::log::LogStore;
use zidek::memory::session::ChatSession;

pub fn history(config: &ZidekConfig, user: &str, room: Option<&str>) -> Result<()> {
    let room = super::room_or_default(config, room);
    let embedder = embedding::create_provider(&config.embedding)?;
    let session = ChatSession::new(LogStore::from_config(config), embedder, user, room);

    let (lines, skipped) = render(&session)
        .with_context(|| format!("failed to read history for {user} in {room}"))?;

    if lines.is_empty() {
        println!("No messages in {room}.");
    }
    for line in &lines {
        println!("{line}");
    }

    if skipped > 0 {
        eprintln!(
            "warning: {skipped} unreadable line(s) skipped (run `zidek doctor --user {user}` for details)"
        );
    }
    Ok(())
}

/// `[HH:MM:SS] name: content` per message, plus the number of skipped lines.
fn render(session: &ChatSession) -> Result<(Vec<String>, usize)> {
    let read = session.history()?;
    let lines = read
        .nodes
        .iter()
        .map(|node| {
            format!(
                "[{}] {}: {}",
                format_time(node.timestamp),
                session.display_name(node),
                node.content
            )
        })
        .collect();
    Ok((lines, read.skipped.len()))
}

/// Local wall-clock `HH:MM:SS`; out-of-range timestamps print as `--:--:--`.
fn format_time(timestamp: i64) -> String {
    DateTime::from_timestamp(timestamp, 0)
        .map(|t| t.with_timezone(&Local).format("%H:%M:%S").to_string())
        .unwrap_or_else(|| "--:--:--".to_string())
}
