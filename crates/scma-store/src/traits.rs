//! Store traits: the minimal interfaces for artefact persistence and auditing.
//!
//! Implementations can be file-backed or in-memory. The handlers don't
//! care; they only need these operations.

use scma_core::ArtefactMap;

use crate::audit::AuditEntry;
use crate::error::Result;

/// Full-document artefact persistence.
///
/// Every mutation is load, edit in memory, save. There is no partial update,
/// no locking and no transaction boundary: if two writers race, the last
/// `save` wins.
pub trait ArtefactRepository: Send + Sync {
    /// Load every artefact.
    ///
    /// A repository with no backing document yet returns an empty map.
    fn load(&self) -> Result<ArtefactMap>;

    /// Replace the whole document with `artefacts`.
    fn save(&self, artefacts: &ArtefactMap) -> Result<()>;
}

/// Append-only audit trail.
///
/// Implementations never read back or rewrite earlier entries.
pub trait AuditLog: Send + Sync {
    /// Append one entry.
    fn record(&self, entry: &AuditEntry) -> Result<()>;
}

impl<R: ArtefactRepository + ?Sized> ArtefactRepository for &R {
    fn load(&self) -> Result<ArtefactMap> {
        (**self).load()
    }

    fn save(&self, artefacts: &ArtefactMap) -> Result<()> {
        (**self).save(artefacts)
    }
}

impl<A: AuditLog + ?Sized> AuditLog for &A {
    fn record(&self, entry: &AuditEntry) -> Result<()> {
        (**self).record(entry)
    }
}
