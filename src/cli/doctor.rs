//! CLI `doctor` command: scan room logs and print a health report.

use anyhow::{Context, Result};

use zidek::config::ZidekConfig;
use zidek::memory::log::LogStore;

const MAX_REASONS: usize = 3;

pub fn doctor(config: &ZidekConfig, user: Option<&str>) -> Result<()> {
    let store = LogStore::from_config(config);
    let root = store.root().to_path_buf();

    println!("Zidek Health Report");
    println!("===================");
    println!();
    println!("Log directory:     {}", root.display());

    if !root.exists() {
        println!("Status:            not found (nothing has been logged yet)");
        return Ok(());
    }

    let stopwords = config.resolved_stopwords_path();
    println!(
        "Stopwords:         {} ({})",
        stopwords.display(),
        if stopwords.exists() { "ok" } else { "MISSING" }
    );
    match config.resolved_lexicon_path() {
        Some(p) => println!("Lexicon:           {}", p.display()),
        None => println!("Lexicon:           built-in"),
    }
    println!();

    let users = match user {
        Some(u) => vec![u.to_string()],
        None => store.users().context("failed to list users")?,
    };

    let mut total_records = 0;
    let mut total_skipped = 0;
    let mut total_bytes = 0;
    for user in &users {
        let rooms = store
            .rooms(user)
            .with_context(|| format!("failed to list rooms for {user}"))?;
        println!("user_{user}:");
        if rooms.is_empty() {
            println!("  (no logs)");
        }
        for room in &rooms {
            let path = store.log_path(user, room)?;
            let size = std::fs::metadata(&path).map(|m| m.len()).unwrap_or(0);
            let read = store
                .read_all(user, room)
                .with_context(|| format!("failed to read {}", path.display()))?;

            println!(
                "  {:<16} {:>6} records  {:>4} skipped  {:>9}",
                room,
                read.len(),
                read.skipped.len(),
                format_bytes(size)
            );
            for skipped in read.skipped.iter().take(MAX_REASONS) {
                println!("    line {}: {}", skipped.line, skipped.reason);
            }
            if read.skipped.len() > MAX_REASONS {
                println!("    ... {} more", read.skipped.len() - MAX_REASONS);
            }

            total_records += read.len();
            total_skipped += read.skipped.len();
            total_bytes += size;
        }
    }

    println!();
    println!("Users:             {}", users.len());
    println!("Records:           {total_records}");
    println!("Skipped lines:     {total_skipped}");
    println!("Total size:        {}", format_bytes(total_bytes));
    if total_skipped == 0 {
        println!("Integrity check:   PASSED");
    } else {
        println!("Integrity check:   {total_skipped} unreadable line(s); they are ignored by every reader");
    }
    Ok(())
}

fn format_bytes(bytes: u64) -> String {
    if bytes < 1024 {
        format!("{bytes} B")
    } else if bytes < 1024 * 1024 {
        format!("{:.1} KB", bytes as f64 / 1024.0)
    } else {
        format!("{:.1} MB", bytes as f64 / (1024.0 * 1024.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bytes_are_humanized() {
        assert_eq!(format_bytes(512), "512 B");
        assert_eq!(format_bytes(2048), "2.0 KB");
        assert_eq!(format_bytes(3 * 1024 * 1024), "3.0 MB");
    }
}
