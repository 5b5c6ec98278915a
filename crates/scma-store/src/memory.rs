//! In-memory implementation of the repository.
//!
//! This is primarily for testing. It has the same full-document semantics
//! as the JSON file but keeps everything in memory with no persistence.

use std::sync::{PoisonError, RwLock};

use scma_core::ArtefactMap;

use crate::error::Result;
use crate::traits::ArtefactRepository;

/// In-memory repository. Thread-safe via RwLock.
#[derive(Debug, Default)]
pub struct MemoryRepository {
    inner: RwLock<MemoryRepositoryInner>,
}

#[derive(Debug, Default)]
struct MemoryRepositoryInner {
    artefacts: ArtefactMap,
    /// Number of successful saves.
    saves: usize,
}

impl MemoryRepository {
    /// Create an empty repository.
    pub fn new() -> Self {
        Self::default()
    }

    /// How many times `save` has been called.
    pub fn save_count(&self) -> usize {
        self.inner.read().unwrap_or_else(PoisonError::into_inner).saves
    }

    /// A copy of the current contents.
    pub fn snapshot(&self) -> ArtefactMap {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .artefacts
            .clone()
    }
}

impl ArtefactRepository for MemoryRepository {
    fn load(&self) -> Result<ArtefactMap> {
        Ok(self.snapshot())
    }

    fn save(&self, artefacts: &ArtefactMap) -> Result<()> {
        let mut inner = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        inner.artefacts = artefacts.clone();
        inner.saves += 1;
        Ok(())
    }
}
