//! Where the vault keeps its files, and how it treats duplicate names.

use std::path::{Path, PathBuf};

use scma_perms::DEFAULT_KEY_FILE;
use scma_store::{DEFAULT_DATA_FILE, DEFAULT_LOG_FILE};

/// What `create` does when the name is already taken.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CreatePolicy {
    /// Replace the existing artefact, owner included.
    #[default]
    Overwrite,
    /// Fail with [`VaultError::Conflict`](crate::VaultError::Conflict).
    Reject,
}

/// Configuration for [`Vault::open`](crate::Vault::open).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VaultConfig {
    /// JSON data file.
    pub data_path: PathBuf,
    /// Plain-text audit log.
    pub log_path: PathBuf,
    /// Symmetric key file.
    pub key_path: PathBuf,
    /// Duplicate-name handling on create.
    pub create_policy: CreatePolicy,
}

impl Default for VaultConfig {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from(DEFAULT_DATA_FILE),
            log_path: PathBuf::from(DEFAULT_LOG_FILE),
            key_path: PathBuf::from(DEFAULT_KEY_FILE),
            create_policy: CreatePolicy::default(),
        }
    }
}

impl VaultConfig {
    /// The default file names, resolved inside `dir`.
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        Self {
            data_path: dir.join(DEFAULT_DATA_FILE),
            log_path: dir.join(DEFAULT_LOG_FILE),
            key_path: dir.join(DEFAULT_KEY_FILE),
            create_policy: CreatePolicy::default(),
        }
    }

    /// Set the duplicate-name policy.
    pub fn with_create_policy(mut self, policy: CreatePolicy) -> Self {
        self.create_policy = policy;
        self
    }
}
