//! Where new artefact content comes from.

use std::fmt;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;
use std::str::FromStr;

use scma_core::Content;

use crate::error::{Result, VaultError};

/// How the content of a new artefact is supplied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArtefactKind {
    /// Typed in directly.
    Text,
    /// Read from a file path.
    File,
}

impl ArtefactKind {
    pub const fn as_str(&self) -> &'static str {
        match self {
            ArtefactKind::Text => "text",
            ArtefactKind::File => "file",
        }
    }
}

impl fmt::Display for ArtefactKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ArtefactKind {
    type Err = VaultError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "text" => Ok(ArtefactKind::Text),
            "file" => Ok(ArtefactKind::File),
            other => Err(VaultError::InvalidInput(format!(
                "invalid artefact type: {other:?}"
            ))),
        }
    }
}

/// Read a file's raw bytes as artefact content.
///
/// The bytes are kept as-is even when they happen to be valid UTF-8.
pub fn read_file_content(path: impl AsRef<Path>) -> Result<Content> {
    let path = path.as_ref();
    match fs::read(path) {
        Ok(bytes) => Ok(Content::Bytes(bytes)),
        Err(e) if e.kind() == ErrorKind::NotFound => Err(VaultError::InvalidInput(format!(
            "file not found: {}",
            path.display()
        ))),
        Err(e) => Err(VaultError::InvalidInput(format!(
            "error reading file {}: {e}",
            path.display()
        ))),
    }
}
