//! The key store: a single key persisted at a well-known path.
//!
//! The first call on a fresh path generates a key and writes it; every
//! later call reads the same bytes back. There is no rotation.

use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use crate::crypto::EncryptionKey;
use crate::error::{PermsError, Result};

/// Default key file name, resolved against the working directory.
pub const DEFAULT_KEY_FILE: &str = "encryption.key";

/// Handle to the on-disk key.
#[derive(Debug, Clone)]
pub struct KeyFile {
    path: PathBuf,
}

impl KeyFile {
    /// Point at a key file. Nothing is read until [`KeyFile::load_or_create`].
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The key file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Return the key file's raw bytes, generating and persisting a new key
    /// first if the file does not exist.
    pub fn load_or_create(&self) -> Result<Vec<u8>> {
        match fs::read(&self.path) {
            Ok(bytes) => {
                tracing::debug!(path = %self.path.display(), "loaded encryption key");
                return Ok(bytes);
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {}
            Err(e) => return Err(self.io_error(e)),
        }

        let encoded = EncryptionKey::generate().to_encoded();
        match self.write_new(encoded.as_bytes()) {
            Ok(()) => {
                tracing::info!(path = %self.path.display(), "generated new encryption key");
                Ok(encoded.into_bytes())
            }
            // Someone else created it between our read and write; use theirs.
            Err(e) if e.kind() == ErrorKind::AlreadyExists => {
                fs::read(&self.path).map_err(|e| self.io_error(e))
            }
            Err(e) => Err(self.io_error(e)),
        }
    }

    /// Load (or create) the key and parse it.
    pub fn load_key(&self) -> Result<EncryptionKey> {
        let raw = self.load_or_create()?;
        EncryptionKey::from_encoded(&raw)
    }

    fn write_new(&self, contents: &[u8]) -> std::io::Result<()> {
        let mut options = OpenOptions::new();
        options.write(true).create_new(true);

        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt;
            options.mode(0o600);
        }

        let mut file = options.open(&self.path)?;
        file.write_all(contents)?;
        file.sync_all()
    }

    fn io_error(&self, source: std::io::Error) -> PermsError {
        PermsError::KeyFile {
            path: self.path.clone(),
            source,
        }
    }
}
