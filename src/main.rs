mod cli;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use zidek::config::ZidekConfig;

#[derive(Parser)]
#[command(name = "zidek", version, about = "Chat memory log with word, bias and recall analytics")]
struct Cli {
    /// Config file (default: ~/.zidek/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Append a message to a room log
    Send {
        #[arg(long)]
        user: String,
        /// Display name stored with the message
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        room: Option<String>,
        text: String,
    },
    /// Print a room log in timestamp order
    History {
        #[arg(long)]
        user: String,
        #[arg(long)]
        room: Option<String>,
    },
    /// Word frequency profile of a room log
    Words {
        #[arg(long)]
        user: String,
        #[arg(long)]
        room: Option<String>,
        /// Write CSV instead of printing; without a value uses user_<id>_word_profile.csv
        #[arg(long, num_args = 0..=1)]
        csv: Option<Option<PathBuf>>,
    },
    /// Ranked lexical categories for a user, with sentiment direction
    Bias {
        #[arg(long)]
        user: String,
        #[arg(long)]
        room: Option<String>,
        #[arg(long)]
        top: Option<usize>,
        /// Write the ranked report as CSV
        #[arg(long)]
        csv: Option<PathBuf>,
        /// Write the full category means as a single-row CSV
        #[arg(long)]
        profile_csv: Option<PathBuf>,
    },
    /// Ranked lexical categories averaged over every user in a room
    BiasAverage {
        #[arg(long)]
        room: Option<String>,
        #[arg(long)]
        top: Option<usize>,
        /// Write the ranked report as CSV
        #[arg(long)]
        csv: Option<PathBuf>,
        /// Write the full category means as a single-row CSV
        #[arg(long)]
        profile_csv: Option<PathBuf>,
    },
    /// Messages most similar to a piece of text
    Recall {
        #[arg(long)]
        user: String,
        #[arg(long)]
        room: Option<String>,
        #[arg(long)]
        top: Option<usize>,
        text: String,
    },
    /// Scan log files and report record and skipped-line counts
    Doctor {
        #[arg(long)]
        user: Option<String>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => ZidekConfig::load_from(path)?,
        None => ZidekConfig::load()?,
    };

    // stdout carries command output, so logs go to stderr.
    let filter = EnvFilter::try_new(&config.logging.log_level)
        .unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Command::Send {
            user,
            name,
            room,
            text,
        } => cli::send::send(&config, &user, name.as_deref(), room.as_deref(), &text)?,
        Command::History { user, room } => cli::history::history(&config, &user, room.as_deref())?,
        Command::Words { user, room, csv } => {
            cli::words::words(&config, &user, room.as_deref(), csv)?
        }
        Command::Bias {
            user,
            room,
            top,
            csv,
            profile_csv,
        } => cli::bias::bias(
            &config,
            &user,
            room.as_deref(),
            top,
            csv.as_deref(),
            profile_csv.as_deref(),
        )?,
        Command::BiasAverage {
            room,
            top,
            csv,
            profile_csv,
        } => cli::bias::bias_average(
            &config,
            room.as_deref(),
            top,
            csv.as_deref(),
            profile_csv.as_deref(),
        )?,
        Command::Recall {
            user,
            room,
            top,
            text,
        } => cli::recall::recall(&config, &user, room.as_deref(), top, &text)?,
        Command::Doctor { user } => cli::doctor::doctor(&config, user.as_deref())?,
    }

    Ok(())
}
