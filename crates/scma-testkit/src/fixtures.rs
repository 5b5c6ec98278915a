//! Test fixtures and helpers.
//!
//! Common setup code for integration tests.

use std::fs;
use std::path::Path;

use tempfile::TempDir;

use scma::{CreatePolicy, Vault, VaultConfig};
use scma_core::{ArtefactName, Identity};
use scma_perms::{Cipher, EncryptionKey};
use scma_store::{MemoryAuditLog, MemoryRepository};

/// A vault wired entirely to memory.
pub type MemoryVault = Vault<MemoryRepository, MemoryAuditLog>;

/// Fixed key for memory vaults.
pub const TEST_KEY: [u8; 32] = [0x42; 32];

/// A file-backed vault in its own temporary directory.
pub struct TestVault {
    pub dir: TempDir,
    pub config: VaultConfig,
    pub vault: Vault,
}

impl TestVault {
    /// Fresh directory, default policy.
    pub fn new() -> Self {
        Self::with_policy(CreatePolicy::Overwrite)
    }

    /// Fresh directory with the given duplicate-name policy.
    pub fn with_policy(policy: CreatePolicy) -> Self {
        let dir = TempDir::new().expect("create temp dir");
        let config = VaultConfig::in_dir(dir.path()).with_create_policy(policy);
        let vault = Vault::open(&config).expect("open vault");
        Self { dir, config, vault }
    }

    /// Drop the vault and open it again from the same files.
    pub fn reopen(self) -> Self {
        let Self { dir, config, vault } = self;
        drop(vault);
        let vault = Vault::open(&config).expect("reopen vault");
        Self { dir, config, vault }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Audit log lines, empty if the log has not been created.
    pub fn log_lines(&self) -> Vec<String> {
        fs::read_to_string(&self.config.log_path)
            .map(|s| s.lines().map(str::to_owned).collect())
            .unwrap_or_default()
    }

    /// The data file parsed as untyped JSON.
    pub fn raw_data(&self) -> serde_json::Value {
        let bytes = fs::read(&self.config.data_path).expect("read data file");
        serde_json::from_slice(&bytes).expect("parse data file")
    }

    /// Overwrite the data file with arbitrary bytes.
    pub fn write_raw_data(&self, bytes: &[u8]) {
        fs::write(&self.config.data_path, bytes).expect("write data file");
    }
}

impl Default for TestVault {
    fn default() -> Self {
        Self::new()
    }
}

/// A vault over memory with a fixed key.
pub fn memory_vault() -> MemoryVault {
    let key = EncryptionKey::from_bytes(TEST_KEY);
    Vault::new(Cipher::new(&key), MemoryRepository::new(), MemoryAuditLog::new())
}

/// The built-in elevated identity.
pub fn admin() -> Identity {
    Identity::from("admin")
}

/// The built-in ordinary identity.
pub fn user() -> Identity {
    Identity::from("user")
}

/// Parse a name, panicking on invalid input.
pub fn name(s: &str) -> ArtefactName {
    ArtefactName::parse(s).expect("valid artefact name")
}
