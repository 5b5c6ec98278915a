//! # SCMA Store
//!
//! Persistence for the SCMA artefact store: the artefact repository and the
//! audit log, each behind a small trait.
//!
//! ## Key Types
//!
//! - [`ArtefactRepository`] - Full-document load/save of every artefact
//! - [`JsonFileRepository`] - The JSON data file
//! - [`MemoryRepository`] - In-memory repository for tests
//! - [`AuditLog`] - Append-only action trail
//! - [`FileAuditLog`] - The plain-text log file
//! - [`MemoryAuditLog`] - In-memory log for tests
//!
//! ## Design Notes
//!
//! - **Full-document writes**: every mutation rewrites the entire data file
//!   via an atomic rename. There is no locking; concurrent processes race and
//!   the last writer wins.
//! - **Missing is empty**: an absent data file loads as an empty mapping.
//! - **No self-repair**: a data file that does not parse is reported as
//!   [`StoreError::Corrupt`] and left untouched.

pub mod audit;
pub mod error;
pub mod json;
pub mod memory;
pub mod traits;

pub use audit::{AuditEntry, FileAuditLog, MemoryAuditLog, DEFAULT_LOG_FILE};
pub use error::{Result, StoreError};
pub use json::{JsonFileRepository, DEFAULT_DATA_FILE};
pub use memory::MemoryRepository;
pub use traits::{ArtefactRepository, AuditLog};
