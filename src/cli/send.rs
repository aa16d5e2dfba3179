//! CLI `send` command: build a message node and append it to a room log.

use anyhow::{Context, Result};

use zidek::config::ZidekConfig;
use zidek::embedding;
use zidek::memory::log::LogStore;
use zidek::memory::session::ChatSession;

pub fn send(
    config: &ZidekConfig,
    user: &str,
    name: Option<&str>,
    room: Option<&str>,
    text: &str,
) -> Result<()> {
    let room = super::room_or_default(config, room);
    let embedder = embedding::create_provider(&config.embedding)?;
    let mut session = ChatSession::new(LogStore::from_config(config), embedder, user, room);
    if let Some(name) = name {
        session.set_username(name);
    }

    match session
        .send(text)
        .with_context(|| format!("failed to append to room {room}"))?
    {
        Some(node) => println!("{}", node.id),
        None => println!("Nothing to send (message is blank)."),
    }
    Ok(())
}
