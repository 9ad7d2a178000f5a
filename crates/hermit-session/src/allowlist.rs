//! Persisted allow-list of conversations eligible for automated replies.
//!
//! Groups are matched by exact conversation id; direct chats by
//! case-insensitive substring of a stored entry within the chat's resolved
//! display name. The substring rule means one entry can match several chats
//! sharing a name fragment — coarse allow-listing by name, kept as-is.

use std::path::{Path, PathBuf};

use tracing::{info, warn};

use hermit_core::types::ConversationId;

use crate::error::Result;

/// Entries used when no allow-list file exists yet.
const DEFAULT_ENTRIES: &[&str] = &["Aryan", "120363403086364841@g.us"];

pub struct AllowList {
    path: PathBuf,
    entries: Vec<String>,
}

impl AllowList {
    /// Load the list from `path`. A missing or unreadable file falls back to
    /// the built-in default entries (with a warning for the unreadable case).
    pub fn load(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let entries = match std::fs::read_to_string(&path) {
            Ok(data) => match serde_json::from_str::<Vec<String>>(&data) {
                Ok(entries) => entries,
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "allow-list file corrupt — using defaults");
                    default_entries()
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => default_entries(),
            Err(e) => {
                warn!(path = %path.display(), error = %e, "allow-list file unreadable — using defaults");
                default_entries()
            }
        };
        Self { path, entries }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    pub fn contains(&self, entry: &str) -> bool {
        self.entries.iter().any(|e| e == entry)
    }

    /// Whether automated replies are enabled for this conversation.
    pub fn is_allowed(
        &self,
        conversation: &ConversationId,
        is_group: bool,
        display_name: &str,
    ) -> bool {
        if is_group {
            self.contains(conversation.as_str())
        } else {
            let name = display_name.to_lowercase();
            self.entries
                .iter()
                .any(|entry| name.contains(&entry.to_lowercase()))
        }
    }

    /// Add an entry. Returns `true` when the set changed. The full list is
    /// persisted before returning.
    pub fn add(&mut self, entry: &str) -> Result<bool> {
        if self.contains(entry) {
            return Ok(false);
        }
        self.entries.push(entry.to_string());
        self.persist()?;
        info!(entry, "allow-list entry added");
        Ok(true)
    }

    /// Remove an entry. Returns `true` when the set changed. The full list is
    /// persisted before returning.
    pub fn remove(&mut self, entry: &str) -> Result<bool> {
        let before = self.entries.len();
        self.entries.retain(|e| e != entry);
        if self.entries.len() == before {
            return Ok(false);
        }
        self.persist()?;
        info!(entry, "allow-list entry removed");
        Ok(true)
    }

    /// Rewrite the whole file. Synchronous — mutators return only after the
    /// new set is on disk.
    fn persist(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let data = serde_json::to_string_pretty(&self.entries)?;
        std::fs::write(&self.path, data)?;
        Ok(())
    }
}

fn default_entries() -> Vec<String> {
    DEFAULT_ENTRIES.iter().map(|s| s.to_string()).collect()
}
