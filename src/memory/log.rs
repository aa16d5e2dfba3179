//! Append-only room logs.
//!
//! One JSON-lines file per (user, room) under
//! `<root>/user_<user_id>/<room>_log.jsonl`. Lines are only ever appended.
//! Readers tolerate damage: a line that does not decode into a
//! [`MessageNode`] is reported as a [`SkippedLine`] and the read continues.
//!
//! Each append holds an exclusive advisory lock on the file while it writes,
//! so appenders on the same host cannot interleave inside a line. Readers do
//! not lock and may observe a trailing partial line, which is skipped.

use fs2::FileExt;
use std::collections::BTreeSet;
use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, ErrorKind, Write};
use std::path::{Path, PathBuf};

use crate::error::{LogError, LogResult};
use crate::memory::types::{LogEntry, LogRead, MessageNode, SkippedLine};

const USER_DIR_PREFIX: &str = "user_";
const LOG_FILE_SUFFIX: &str = "_log.jsonl";

/// Handle on a directory of per-user room logs.
#[derive(Debug, Clone)]
pub struct LogStore {
    root: PathBuf,
}

impl LogStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Store rooted at the configured log directory.
    pub fn from_config(config: &crate::config::ZidekConfig) -> Self {
        Self::new(config.resolved_log_dir())
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn user_dir(&self, user_id: &str) -> LogResult<PathBuf> {
        validate_name("user", user_id)?;
        Ok(self.root.join(format!("{USER_DIR_PREFIX}{user_id}")))
    }

    pub fn log_path(&self, user_id: &str, room: &str) -> LogResult<PathBuf> {
        validate_name("room", room)?;
        Ok(self.user_dir(user_id)?.join(format!("{room}{LOG_FILE_SUFFIX}")))
    }

    /// Append one record as a single JSON line, creating folder and file as
    /// needed. Existing lines are never touched.
    pub fn append(&self, user_id: &str, room: &str, node: &MessageNode) -> LogResult<()> {
        let dir = self.user_dir(user_id)?;
        let path = self.log_path(user_id, room)?;

        std::fs::create_dir_all(&dir).map_err(|e| LogError::io(&dir, e))?;

        let mut line = serde_json::to_string(node)?;
        line.push('\n');

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(|e| LogError::io(&path, e))?;

        FileExt::lock_exclusive(&file).map_err(|e| LogError::io(&path, e))?;
        let written = file
            .write_all(line.as_bytes())
            .and_then(|_| file.flush());
        let unlocked = FileExt::unlock(&file);
        written.map_err(|e| LogError::io(&path, e))?;
        unlocked.map_err(|e| LogError::io(&path, e))?;

        tracing::debug!(
            path = %path.display(),
            id = %node.id,
            bytes = line.len(),
            "appended message"
        );
        Ok(())
    }

    /// Lazily iterate a room log. A missing file yields nothing.
    pub fn entries(&self, user_id: &str, room: &str) -> LogResult<LogEntries> {
        entries_at(self.log_path(user_id, room)?)
    }

    /// Read a whole room log, re-reading the file on every call.
    pub fn read_all(&self, user_id: &str, room: &str) -> LogResult<LogRead> {
        read_path(self.log_path(user_id, room)?)
    }

    /// Room log ordered by timestamp (stable for equal timestamps).
    pub fn history(&self, user_id: &str, room: &str) -> LogResult<LogRead> {
        let mut read = self.read_all(user_id, room)?;
        read.nodes.sort_by_key(|n| n.timestamp);
        Ok(read)
    }

    /// User ids with a folder under the root, sorted.
    pub fn users(&self) -> LogResult<Vec<String>> {
        let mut users: Vec<String> = list_dir(&self.root)?
            .into_iter()
            .filter(|(_, is_dir)| *is_dir)
            .filter_map(|(name, _)| name.strip_prefix(USER_DIR_PREFIX).map(str::to_string))
            .filter(|id| !id.is_empty())
            .collect();
        users.sort();
        Ok(users)
    }

    /// Rooms with a log file for `user_id`, sorted.
    pub fn rooms(&self, user_id: &str) -> LogResult<Vec<String>> {
        let dir = self.user_dir(user_id)?;
        let mut rooms: Vec<String> = list_dir(&dir)?
            .into_iter()
            .filter(|(_, is_dir)| !*is_dir)
            .filter_map(|(name, _)| name.strip_suffix(LOG_FILE_SUFFIX).map(str::to_string))
            .filter(|room| !room.is_empty())
            .collect();
        rooms.sort();
        Ok(rooms)
    }

    /// Distinct `user_id` values found in any user's log for `room`, sorted.
    pub fn users_in_room(&self, room: &str) -> LogResult<Vec<String>> {
        validate_name("room", room)?;
        let mut found = BTreeSet::new();
        for owner in self.users()? {
            let read = self.read_all(&owner, room)?;
            found.extend(
                read.nodes
                    .into_iter()
                    .map(|n| n.user_id)
                    .filter(|id| !id.is_empty()),
            );
        }
        Ok(found.into_iter().collect())
    }
}

/// Lazy reader over one log file. Yields `Err` only for I/O failures.
pub struct LogEntries {
    reader: Option<BufReader<File>>,
    path: PathBuf,
    line_no: usize,
    buf: Vec<u8>,
}

impl Iterator for LogEntries {
    type Item = LogResult<LogEntry>;

    fn next(&mut self) -> Option<Self::Item> {
        let reader = self.reader.as_mut()?;
        loop {
            self.buf.clear();
            match reader.read_until(b'\n', &mut self.buf) {
                Ok(0) => {
                    self.reader = None;
                    return None;
                }
                Ok(_) => {
                    self.line_no += 1;
                    if let Some(entry) = parse_line(&self.buf, self.line_no) {
                        return Some(Ok(entry));
                    }
                }
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => {
                    self.reader = None;
                    return Some(Err(LogError::io(&self.path, e)));
                }
            }
        }
    }
}

/// Lazily iterate the log at `path`. A missing file yields nothing.
pub fn entries_at(path: impl AsRef<Path>) -> LogResult<LogEntries> {
    let path = path.as_ref().to_path_buf();
    let reader = match File::open(&path) {
        Ok(file) => Some(BufReader::new(file)),
        Err(e) if e.kind() == ErrorKind::NotFound => None,
        Err(e) => return Err(LogError::io(&path, e)),
    };
    Ok(LogEntries {
        reader,
        path,
        line_no: 0,
        buf: Vec::new(),
    })
}

/// Read the whole log at `path`.
pub fn read_path(path: impl AsRef<Path>) -> LogResult<LogRead> {
    let path = path.as_ref();
    let mut read = LogRead::default();
    for entry in entries_at(path)? {
        match entry? {
            LogEntry::Node { node, .. } => read.nodes.push(node),
            LogEntry::Skipped(skip) => {
                tracing::debug!(
                    path = %path.display(),
                    line = skip.line,
                    reason = %skip.reason,
                    "skipping malformed log line"
                );
                read.skipped.push(skip);
            }
        }
    }
    if !read.skipped.is_empty() {
        tracing::warn!(
            path = %path.display(),
            skipped = read.skipped.len(),
            parsed = read.nodes.len(),
            "dropped malformed log lines"
        );
    }
    Ok(read)
}

/// `None` for blank lines, which are neither records nor damage.
fn parse_line(raw: &[u8], line: usize) -> Option<LogEntry> {
    let text = match std::str::from_utf8(raw) {
        Ok(t) => t.trim(),
        Err(e) => {
            return Some(LogEntry::Skipped(SkippedLine {
                line,
                reason: format!("invalid UTF-8: {e}"),
            }))
        }
    };
    if text.is_empty() {
        return None;
    }
    Some(match serde_json::from_str::<MessageNode>(text) {
        Ok(node) => LogEntry::Node { line, node },
        Err(e) => LogEntry::Skipped(SkippedLine {
            line,
            reason: e.to_string(),
        }),
    })
}

/// Entries of `dir` as (file name, is_dir). Missing directory is empty.
fn list_dir(dir: &Path) -> LogResult<Vec<(String, bool)>> {
    let iter = match std::fs::read_dir(dir) {
        Ok(it) => it,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => return Err(LogError::io(dir, e)),
    };
    let mut out = Vec::new();
    for entry in iter {
        let entry = entry.map_err(|e| LogError::io(dir, e))?;
        let is_dir = entry
            .file_type()
            .map_err(|e| LogError::io(entry.path(), e))?
            .is_dir();
        if let Some(name) = entry.file_name().to_str() {
            out.push((name.to_string(), is_dir));
        }
    }
    Ok(out)
}

/// User ids and room names become path components.
fn validate_name(kind: &'static str, value: &str) -> LogResult<()> {
    let bad = value.is_empty()
        || value == "."
        || value == ".."
        || value.contains(['/', '\\', '\0']);
    if bad {
        return Err(LogError::InvalidName {
            kind,
            value: value.to_string(),
        });
    }
    Ok(())
}
