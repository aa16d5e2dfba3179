//! CLI `bias` and `bias-average` commands.

use anyhow::{Context, Result};
use std::path::Path;

use zidek::analysis::bias::{BiasAnalyzer, AVERAGE_LABEL};
use zidek::analysis::export::{export_to, write_bias_profile, write_report};
use zidek::analysis::lexicon::WordListLexicon;
use zidek::analysis::sentiment::ValenceSentiment;
use zidek::analysis::{BiasProfile, CategoryScore};
use zidek::config::ZidekConfig;
use zidek::memory::log::LogStore;

/// Ranked categories for one user.
pub fn bias(
    config: &ZidekConfig,
    user: &str,
    room: Option<&str>,
    top: Option<usize>,
    csv: Option<&Path>,
    profile_csv: Option<&Path>,
) -> Result<()> {
    let room = super::room_or_default(config, room);
    let top = top.unwrap_or(config.analysis.top_categories);
    let store = LogStore::from_config(config);
    let lexicon = load_lexicon(config)?;
    let sentiment = ValenceSentiment::default();
    let analyzer = BiasAnalyzer::new(&store, &lexicon, &sentiment);

    if let Some(path) = profile_csv {
        let profile = analyzer
            .analyze_user(user, room)
            .with_context(|| format!("failed to analyze {user} in {room}"))?;
        export_profile(path, &profile)?;
    }

    let rows = analyzer
        .bias_report(user, room, top)
        .with_context(|| format!("failed to analyze {user} in {room}"))?;
    output(user, room, &rows, csv)
}

/// Ranked categories averaged over every user with a log for the room.
pub fn bias_average(
    config: &ZidekConfig,
    room: Option<&str>,
    top: Option<usize>,
    csv: Option<&Path>,
    profile_csv: Option<&Path>,
) -> Result<()> {
    let room = super::room_or_default(config, room);
    let top = top.unwrap_or(config.analysis.top_categories);
    let store = LogStore::from_config(config);
    let lexicon = load_lexicon(config)?;
    let sentiment = ValenceSentiment::default();
    let analyzer = BiasAnalyzer::new(&store, &lexicon, &sentiment);

    if let Some(path) = profile_csv {
        let profile = analyzer
            .average_profile(room)
            .with_context(|| format!("failed to average profiles in {room}"))?;
        export_profile(path, &profile)?;
    }

    let rows = analyzer
        .average_report(room, top)
        .with_context(|| format!("failed to average profiles in {room}"))?;
    output(AVERAGE_LABEL, room, &rows, csv)
}

fn load_lexicon(config: &ZidekConfig) -> Result<WordListLexicon> {
    let path = config.resolved_lexicon_path();
    Ok(WordListLexicon::load(path.as_deref())?)
}

/// Single-row CSV of every category mean.
fn export_profile(path: &Path, profile: &BiasProfile) -> Result<()> {
    export_to(path, |out| write_bias_profile(out, profile))?;
    println!("Bias profile written to {}", path.display());
    Ok(())
}

fn output(label: &str, room: &str, rows: &[CategoryScore], csv: Option<&Path>) -> Result<()> {
    if let Some(path) = csv {
        export_to(path, |out| write_report(out, rows))?;
        println!("Bias report written to {}", path.display());
        return Ok(());
    }

    if rows.is_empty() {
        println!("No messages to analyze for {label} in {room}.");
        return Ok(());
    }

    println!("Bias Report: {label} ({room})");
    println!("{}", "=".repeat(40));
    println!("  {:<20} {:>9}  {:>9}", "category", "intensity", "sentiment");
    for row in rows {
        // no qualifying message reads as neutral
        let sentiment = row.sentiment.unwrap_or(0.0);
        println!("  {:<20} {:>9.4}  {:>+9.4}", row.category, row.intensity, sentiment);
    }
    Ok(())
}
