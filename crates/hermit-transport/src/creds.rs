//! Durable storage for transport credential material.
//!
//! The blob is opaque to the runtime. It is written synchronously whenever
//! the transport signals an update, independent of connection state, so a
//! crash between update and restart never loses pairing.

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::TransportError;

pub struct CredentialStore {
    path: PathBuf,
}

impl CredentialStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the stored blob. `None` when no credentials have been saved yet.
    pub fn load(&self) -> Result<Option<Vec<u8>>, TransportError> {
        match std::fs::read(&self.path) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(TransportError::Credentials(e.to_string())),
        }
    }

    /// Persist the blob, creating parent directories as needed.
    pub fn save(&self, bytes: &[u8]) -> Result<(), TransportError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| TransportError::Credentials(e.to_string()))?;
        }
        std::fs::write(&self.path, bytes)
            .map_err(|e| TransportError::Credentials(e.to_string()))?;
        debug!(path = %self.path.display(), len = bytes.len(), "credentials persisted");
        Ok(())
    }
}
