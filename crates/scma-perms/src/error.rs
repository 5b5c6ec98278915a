//! Error types for the permissions module.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur during access control, key handling or encryption.
#[derive(Debug, Error)]
pub enum PermsError {
    /// Bad username or password.
    #[error("authentication failed")]
    AuthenticationFailed,

    /// Role or ownership check failed.
    #[error("permission denied: {0}")]
    PermissionDenied(String),

    /// Encryption error.
    #[error("encryption error: {0}")]
    EncryptionError(String),

    /// Ciphertext is malformed, was produced under another key, or was tampered with.
    #[error("decryption error: {0}")]
    DecryptionError(String),

    /// Key file contents are not a valid key.
    #[error("invalid key: {0}")]
    InvalidKey(String),

    /// Key file could not be read or written.
    #[error("key file {path}: {source}")]
    KeyFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Result type for permission operations.
pub type Result<T> = std::result::Result<T, PermsError>;
