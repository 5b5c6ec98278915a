//! The audit log: one line per successful action.
//!
//! Line format:
//!
//! ```text
//! [2024-05-01 12:00:00] admin performed deleted on chorus-draft
//! ```

use std::fmt;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{PoisonError, RwLock};

use scma_core::{Action, ArtefactName, Identity, Timestamp};

use crate::error::{Result, StoreError};
use crate::traits::AuditLog;

/// Default log file name, resolved against the working directory.
pub const DEFAULT_LOG_FILE: &str = "scma_log.txt";

/// A single audit record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuditEntry {
    pub timestamp: Timestamp,
    pub identity: Identity,
    pub action: Action,
    pub artefact: ArtefactName,
}

impl AuditEntry {
    /// An entry stamped with the current time.
    pub fn now(identity: Identity, action: Action, artefact: ArtefactName) -> Self {
        Self {
            timestamp: Timestamp::now(),
            identity,
            action,
            artefact,
        }
    }
}

impl fmt::Display for AuditEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] {} performed {} on {}",
            self.timestamp,
            self.identity,
            self.action.past_tense(),
            self.artefact
        )
    }
}

/// Audit log backed by an append-only text file.
///
/// Each call opens the file in append mode, writes one line, flushes and
/// syncs, then closes it. Nothing is buffered between calls.
#[derive(Debug, Clone)]
pub struct FileAuditLog {
    path: PathBuf,
}

impl FileAuditLog {
    /// Point at a log file. It is created on the first write.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The log file path.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl AuditLog for FileAuditLog {
    fn record(&self, entry: &AuditEntry) -> Result<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|e| StoreError::io(&self.path, e))?;

        writeln!(file, "{}", entry).map_err(|e| StoreError::io(&self.path, e))?;
        file.flush().map_err(|e| StoreError::io(&self.path, e))?;
        file.sync_data().map_err(|e| StoreError::io(&self.path, e))?;

        tracing::debug!(path = %self.path.display(), action = %entry.action, "audit entry written");
        Ok(())
    }
}

/// In-memory audit log for tests.
#[derive(Debug, Default)]
pub struct MemoryAuditLog {
    lines: RwLock<Vec<String>>,
}

impl MemoryAuditLog {
    /// Create an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Every line recorded so far.
    pub fn lines(&self) -> Vec<String> {
        self.lines
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Number of entries recorded.
    pub fn len(&self) -> usize {
        self.lines.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    /// Whether nothing has been recorded.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl AuditLog for MemoryAuditLog {
    fn record(&self, entry: &AuditEntry) -> Result<()> {
        self.lines
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push(entry.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn entry(action: Action) -> AuditEntry {
        AuditEntry {
            timestamp: "2024-05-01 12:00:00".parse().unwrap(),
            identity: Identity::from("admin"),
            action,
            artefact: ArtefactName::parse("chorus-draft").unwrap(),
        }
    }

    #[test]
    fn test_line_format() {
        assert_eq!(
            entry(Action::Delete).to_string(),
            "[2024-05-01 12:00:00] admin performed deleted on chorus-draft"
        );
        assert_eq!(
            entry(Action::Read).to_string(),
            "[2024-05-01 12:00:00] admin performed read on chorus-draft"
        );
    }

    #[test]
    fn test_file_log_appends() {
        let dir = tempfile::TempDir::new().unwrap();
        let log = FileAuditLog::new(dir.path().join(DEFAULT_LOG_FILE));

        log.record(&entry(Action::Create)).unwrap();
        log.record(&entry(Action::Update)).unwrap();

        let contents = fs::read_to_string(log.path()).unwrap();
        let lines: Vec<_> = contents.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].ends_with("performed created on chorus-draft"));
        assert!(lines[1].ends_with("performed updated on chorus-draft"));
        assert!(contents.ends_with('\n'));
    }

    #[test]
    fn test_file_log_keeps_existing_lines() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join(DEFAULT_LOG_FILE);
        fs::write(&path, "earlier line\n").unwrap();

        FileAuditLog::new(&path).record(&entry(Action::Read)).unwrap();

        let contents = fs::read_to_string(&path).unwrap();
        assert!(contents.starts_with("earlier line\n"));
        assert_eq!(contents.lines().count(), 2);
    }

    #[test]
    fn test_unwritable_log_is_io_error() {
        let dir = tempfile::TempDir::new().unwrap();
        let log = FileAuditLog::new(dir.path().join("no-such-dir").join(DEFAULT_LOG_FILE));

        assert!(matches!(
            log.record(&entry(Action::Create)),
            Err(StoreError::Io { .. })
        ));
    }

    #[test]
    fn test_memory_log() {
        let log = MemoryAuditLog::new();
        assert!(log.is_empty());

        log.record(&entry(Action::Create)).unwrap();
        assert_eq!(log.len(), 1);
        assert_eq!(log.lines()[0], entry(Action::Create).to_string());
    }
}
