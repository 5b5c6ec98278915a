//! The artefact record: the unit the repository persists.
//!
//! An artefact is keyed by its [`ArtefactName`] in an [`ArtefactMap`]. The
//! owner is fixed when the artefact is created; updates replace the
//! ciphertext, digest and timestamp together.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::digest::ContentDigest;
use crate::types::{ArtefactName, Ciphertext, Identity, Timestamp};

/// Every artefact in the store, keyed by name.
pub type ArtefactMap = BTreeMap<ArtefactName, Artefact>;

/// A stored artefact.
///
/// Field order and names match the data file: `owner`, `content`, `hash`,
/// `timestamp`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Artefact {
    /// Identity that created the artefact. Updates leave it alone.
    pub owner: Identity,

    /// Encrypted plaintext.
    pub content: Ciphertext,

    /// SHA-256 of the plaintext at the last write.
    #[serde(rename = "hash")]
    pub digest: ContentDigest,

    /// Time of the last write.
    pub timestamp: Timestamp,
}

impl Artefact {
    /// Create a new artefact record.
    pub fn new(
        owner: Identity,
        content: Ciphertext,
        digest: ContentDigest,
        timestamp: Timestamp,
    ) -> Self {
        Self {
            owner,
            content,
            digest,
            timestamp,
        }
    }

    /// Replace content, digest and timestamp in one step. Owner is untouched.
    pub fn rewrite(&mut self, content: Ciphertext, digest: ContentDigest, timestamp: Timestamp) {
        self.content = content;
        self.digest = digest;
        self.timestamp = timestamp;
    }
}
