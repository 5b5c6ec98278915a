//! Error types for the Vault.

use scma_core::{Action, ArtefactName, CoreError};
use scma_perms::PermsError;
use scma_store::StoreError;
use thiserror::Error;

/// Errors that can occur during Vault operations.
#[derive(Debug, Error)]
pub enum VaultError {
    /// Unknown username or wrong password.
    #[error("authentication failed")]
    AuthenticationFailure,

    /// The role check or the ownership check refused the action.
    #[error("unauthorized: {0}")]
    Unauthorized(String),

    /// No artefact with this name.
    #[error("artefact not found: {0}")]
    NotFound(ArtefactName),

    /// Create refused because the name is taken.
    #[error("artefact already exists: {0}")]
    Conflict(ArtefactName),

    /// Malformed name, unknown artefact kind, unreadable source file.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Plaintext could not be sealed.
    #[error("encryption failed: {0}")]
    Encryption(String),

    /// Stored ciphertext failed authentication or is malformed.
    #[error("decryption failed: {0}")]
    Decryption(String),

    /// The data file exists but cannot be parsed.
    #[error("data store is corrupt: {0}")]
    CorruptStore(#[source] StoreError),

    /// The key file could not be read, created or decoded.
    #[error("key store error: {0}")]
    KeyStore(#[source] PermsError),

    /// I/O failure on the data file.
    #[error("storage error: {0}")]
    Storage(#[source] StoreError),

    /// The action completed but its audit line could not be written.
    ///
    /// For create, update and delete the change is already saved.
    #[error("{action} completed but the audit log could not be written: {source}")]
    Audit {
        action: Action,
        #[source]
        source: StoreError,
    },
}

impl VaultError {
    /// Whether the process should stop rather than return to the menu.
    pub fn is_fatal(&self) -> bool {
        matches!(self, VaultError::CorruptStore(_) | VaultError::KeyStore(_))
    }
}

impl From<PermsError> for VaultError {
    fn from(err: PermsError) -> Self {
        match err {
            PermsError::AuthenticationFailed => VaultError::AuthenticationFailure,
            PermsError::PermissionDenied(reason) => VaultError::Unauthorized(reason),
            PermsError::EncryptionError(reason) => VaultError::Encryption(reason),
            PermsError::DecryptionError(reason) => VaultError::Decryption(reason),
            err @ (PermsError::InvalidKey(_) | PermsError::KeyFile { .. }) => {
                VaultError::KeyStore(err)
            }
        }
    }
}

impl From<StoreError> for VaultError {
    fn from(err: StoreError) -> Self {
        if err.is_corrupt() {
            VaultError::CorruptStore(err)
        } else {
            VaultError::Storage(err)
        }
    }
}

impl From<CoreError> for VaultError {
    fn from(err: CoreError) -> Self {
        VaultError::InvalidInput(err.to_string())
    }
}

/// Result type for Vault operations.
pub type Result<T> = std::result::Result<T, VaultError>;
