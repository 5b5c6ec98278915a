//! JSON-file implementation of the repository.
//!
//! This is the primary storage backend. The whole artefact mapping is one
//! JSON object, pretty-printed with 4-space indentation:
//!
//! ```json
//! {
//!     "lyrics": {
//!         "owner": "user",
//!         "content": "AQ...",
//!         "hash": "9f86d0...",
//!         "timestamp": "2024-05-01 12:00:00"
//!     }
//! }
//! ```
//!
//! Saves go to a temporary file in the same directory which is then renamed
//! over the target, so a reader never sees a half-written document.

use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use tempfile::NamedTempFile;

use scma_core::ArtefactMap;

use crate::error::{Result, StoreError};
use crate::traits::ArtefactRepository;

/// Default data file name, resolved against the working directory.
pub const DEFAULT_DATA_FILE: &str = "scma_data.json";

/// Repository backed by a single JSON document.
#[derive(Debug, Clone)]
pub struct JsonFileRepository {
    path: PathBuf,
}

impl JsonFileRepository {
    /// Point at a data file. Nothing is read until [`ArtefactRepository::load`].
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The data file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Serialize a mapping the way it is written to disk.
    pub fn encode(artefacts: &ArtefactMap) -> Result<Vec<u8>> {
        let mut buf = Vec::new();
        let formatter = PrettyFormatter::with_indent(b"    ");
        let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
        artefacts.serialize(&mut serializer)?;
        Ok(buf)
    }

    fn parent_dir(&self) -> &Path {
        match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        }
    }
}

impl ArtefactRepository for JsonFileRepository {
    fn load(&self) -> Result<ArtefactMap> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::debug!(path = %self.path.display(), "no data file yet, starting empty");
                return Ok(ArtefactMap::new());
            }
            Err(e) => return Err(StoreError::io(&self.path, e)),
        };

        let artefacts: ArtefactMap =
            serde_json::from_slice(&bytes).map_err(|source| StoreError::Corrupt {
                path: self.path.clone(),
                source,
            })?;

        tracing::debug!(path = %self.path.display(), count = artefacts.len(), "loaded artefacts");
        Ok(artefacts)
    }

    fn save(&self, artefacts: &ArtefactMap) -> Result<()> {
        let encoded = Self::encode(artefacts)?;

        let mut tmp =
            NamedTempFile::new_in(self.parent_dir()).map_err(|e| StoreError::io(&self.path, e))?;
        tmp.write_all(&encoded)
            .map_err(|e| StoreError::io(tmp.path(), e))?;
        tmp.as_file()
            .sync_all()
            .map_err(|e| StoreError::io(tmp.path(), e))?;
        tmp.persist(&self.path)
            .map_err(|e| StoreError::io(&self.path, e.error))?;

        tracing::debug!(path = %self.path.display(), count = artefacts.len(), "saved artefacts");
        Ok(())
    }
}
