//! Saved-messages file: append-only timestamped quotes.

use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::Local;

use crate::error::Result;

pub struct SavedMessages {
    path: PathBuf,
}

impl SavedMessages {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append one timestamped line.
    pub fn append(&self, text: &str) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let mut file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        let stamp = Local::now().format("%Y-%m-%d %H:%M:%S");
        writeln!(file, "[{stamp}] {text}")?;
        Ok(())
    }

    /// The whole file, or `None` when nothing has been saved.
    pub fn list(&self) -> Result<Option<String>> {
        match std::fs::read_to_string(&self.path) {
            Ok(data) => Ok(Some(data)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Remove the file. A missing file is already clear.
    pub fn clear(&self) -> Result<()> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn list_before_any_save_is_none() {
        let dir = tempdir().unwrap();
        let saved = SavedMessages::new(dir.path().join("pinned.txt"));
        assert!(saved.list().unwrap().is_none());
    }

    #[test]
    fn append_then_list_keeps_order() {
        let dir = tempdir().unwrap();
        let saved = SavedMessages::new(dir.path().join("pinned.txt"));
        saved.append("first quote").unwrap();
        saved.append("second quote").unwrap();
        let data = saved.list().unwrap().unwrap();
        let first = data.find("first quote").unwrap();
        let second = data.find("second quote").unwrap();
        assert!(first < second);
        assert!(data.starts_with('['));
    }

    #[test]
    fn clear_removes_everything() {
        let dir = tempdir().unwrap();
        let saved = SavedMessages::new(dir.path().join("pinned.txt"));
        saved.append("quote").unwrap();
        saved.clear().unwrap();
        assert!(saved.list().unwrap().is_none());
        // Clearing twice is fine.
        saved.clear().unwrap();
    }
}
