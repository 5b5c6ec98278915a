//! # SCMA Permissions
//!
//! Access control, credentials, key storage and content encryption.
//!
//! ## Overview
//!
//! - **Access control**: a fixed role table ([`Role`]) and identity bindings
//!   ([`AccessPolicy`]). `read`/`update` additionally require ownership
//!   unless the role bypasses it; `delete` is reserved for the elevated role.
//! - **Credentials**: [`CredentialTable`] maps identities to secrets and
//!   turns a username/password pair into an authenticated [`Identity`].
//! - **Key store**: [`KeyFile`] loads the single symmetric key, or generates
//!   and persists it on first use.
//! - **Cipher service**: [`Cipher`] wraps one ChaCha20-Poly1305 context.
//!   Every encryption draws a fresh nonce; tampered or foreign tokens fail
//!   to decrypt.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use scma_perms::{AccessPolicy, Action, Cipher, CredentialTable, KeyFile};
//!
//! let key = KeyFile::new("encryption.key").load_key().unwrap();
//! let cipher = Cipher::new(&key);
//!
//! let who = CredentialTable::builtin().authenticate("user", "user123").unwrap();
//! AccessPolicy::builtin().authorize(&who, Action::Create).unwrap();
//!
//! let token = cipher.encrypt(b"lyrics").unwrap();
//! let plain = cipher.decrypt(&token).unwrap();
//! ```
//!
//! [`Identity`]: scma_core::Identity

pub mod cipher;
pub mod credentials;
pub mod crypto;
pub mod error;
pub mod keyfile;
pub mod policy;
pub mod role;

pub use cipher::{Cipher, TOKEN_VERSION};
pub use credentials::CredentialTable;
pub use crypto::{EncryptionKey, EncryptionNonce, KEY_LEN, NONCE_LEN};
pub use error::{PermsError, Result};
pub use keyfile::{KeyFile, DEFAULT_KEY_FILE};
pub use policy::AccessPolicy;
pub use role::{PermissionSet, Role};

pub use scma_core::Action;
