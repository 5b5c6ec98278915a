//! # SCMA
//!
//! The Secure Copyright Management Artefact vault: a small store of named
//! artefacts (lyrics, recordings, scores) that are encrypted at rest, carry
//! an integrity digest, and are guarded by fixed users and roles.
//!
//! ## Overview
//!
//! - **Artefacts**: named records holding ciphertext, a SHA-256 digest of
//!   the plaintext, an owner and a timestamp
//! - **Access control**: `admin` may do everything; `user` may create, and
//!   read or update only what it owns
//! - **Audit**: every successful action appends one line to a log file
//!
//! ## Usage
//!
//! ```rust,no_run
//! use scma::{ArtefactName, Content, Vault, VaultConfig};
//!
//! fn example() -> scma::Result<()> {
//!     let vault = Vault::open(&VaultConfig::default())?;
//!
//!     let me = vault.login("user", "user123")?;
//!     let name = ArtefactName::parse("chorus")?;
//!
//!     vault.create(&me, &name, &Content::from("la la la"))?;
//!     let view = vault.read(&me, &name)?;
//!     assert!(view.digest_matches);
//!     Ok(())
//! }
//! ```
//!
//! ## Re-exports
//!
//! This crate re-exports the component crates for convenience:
//!
//! - `scma::core` - Artefact model, digest, names
//! - `scma::perms` - Keys, cipher, roles, credentials
//! - `scma::store` - Data file and audit log

pub mod config;
pub mod error;
pub mod source;
pub mod vault;

// Re-export component crates
pub use scma_core as core;
pub use scma_perms as perms;
pub use scma_store as store;

// Re-export main types for convenience
pub use config::{CreatePolicy, VaultConfig};
pub use error::{Result, VaultError};
pub use source::{read_file_content, ArtefactKind};
pub use vault::{ArtefactView, Vault};

// Re-export commonly used core types
pub use scma_core::{Action, ArtefactName, Content, ContentDigest, Identity, Timestamp};
