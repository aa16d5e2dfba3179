//! Per-session chat state.
//!
//! A [`ChatSession`] is owned by whatever front end drives the chat. It holds
//! the signed-in user, the display name, the active room and the local
//! nickname map; nothing here is process-global.

use std::collections::HashMap;

use crate::embedding::EmbeddingProvider;
use crate::error::LogResult;
use crate::memory::log::LogStore;
use crate::memory::node::NodeBuilder;
use crate::memory::recall::{recall, RecallResult};
use crate::memory::types::{LogRead, MessageNode};

pub const ANONYMOUS: &str = "Anonymous";
const FALLBACK_NAME: &str = "User";

pub struct ChatSession {
    store: LogStore,
    embedder: Box<dyn EmbeddingProvider>,
    user_id: String,
    username: String,
    room: String,
    nicknames: HashMap<String, String>,
}

impl ChatSession {
    pub fn new(
        store: LogStore,
        embedder: Box<dyn EmbeddingProvider>,
        user_id: impl Into<String>,
        room: impl Into<String>,
    ) -> Self {
        Self {
            store,
            embedder,
            user_id: user_id.into(),
            username: ANONYMOUS.to_string(),
            room: room.into(),
            nicknames: HashMap::new(),
        }
    }

    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    /// Blank names fall back to "Anonymous".
    pub fn set_username(&mut self, name: &str) {
        let name = name.trim();
        self.username = if name.is_empty() {
            ANONYMOUS.to_string()
        } else {
            name.to_string()
        };
    }

    pub fn room(&self) -> &str {
        &self.room
    }

    pub fn switch_room(&mut self, room: impl Into<String>) {
        self.room = room.into();
    }

    pub fn store(&self) -> &LogStore {
        &self.store
    }

    /// A blank nickname clears any existing one.
    pub fn set_nickname(&mut self, user_id: &str, nickname: &str) {
        let nickname = nickname.trim();
        if nickname.is_empty() {
            self.nicknames.remove(user_id);
        } else {
            self.nicknames
                .insert(user_id.to_string(), nickname.to_string());
        }
    }

    pub fn nickname(&self, user_id: &str) -> Option<&str> {
        self.nicknames.get(user_id).map(String::as_str)
    }

    /// Nickname, else the name stored on the message, else "User".
    pub fn display_name<'a>(&'a self, node: &'a MessageNode) -> &'a str {
        if let Some(nick) = self.nickname(&node.user_id) {
            return nick;
        }
        if node.username.is_empty() {
            FALLBACK_NAME
        } else {
            &node.username
        }
    }

    /// Build and append a message to the active room. Blank input is ignored.
    pub fn send(&self, content: &str) -> LogResult<Option<MessageNode>> {
        let content = content.trim();
        if content.is_empty() {
            return Ok(None);
        }
        let node = NodeBuilder::new(self.embedder.as_ref()).build(
            &self.user_id,
            &self.username,
            &self.room,
            content,
        );
        self.store.append(&self.user_id, &self.room, &node)?;
        tracing::info!(
            user = %self.user_id,
            room = %self.room,
            id = %node.id,
            "message sent"
        );
        Ok(Some(node))
    }

    /// Active room's log in timestamp order.
    pub fn history(&self) -> LogResult<LogRead> {
        self.store.history(&self.user_id, &self.room)
    }

    /// Messages in the active room most similar to `text`.
    pub fn recall(&self, text: &str, top_n: usize) -> LogResult<RecallResult> {
        let path = self.store.log_path(&self.user_id, &self.room)?;
        recall(path, &self.embedder.embed(text), top_n)
    }
}
