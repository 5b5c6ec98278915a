//! Credential table: identity → secret.
//!
//! Secrets are kept as SHA-256 digests so the table never holds plaintext
//! passwords after construction. Digests are compared in constant time, and
//! an unknown username still goes through one comparison.

use std::collections::BTreeMap;

use sha2::{Digest, Sha256};
use subtle::ConstantTimeEq;

use scma_core::Identity;

use crate::error::{PermsError, Result};

/// Compared against when the username is not registered.
const UNKNOWN_IDENTITY_DIGEST: [u8; 32] = [0u8; 32];

/// Identity → secret digest.
#[derive(Clone, Default)]
pub struct CredentialTable {
    secrets: BTreeMap<Identity, [u8; 32]>,
}

impl CredentialTable {
    /// An empty table. Every login fails.
    pub fn new() -> Self {
        Self::default()
    }

    /// The built-in accounts: `admin`/`admin123` and `user`/`user123`.
    pub fn builtin() -> Self {
        Self::new()
            .with_secret(Identity::from("admin"), "admin123")
            .with_secret(Identity::from("user"), "user123")
    }

    /// Register an identity with its secret, replacing any earlier one.
    pub fn with_secret(mut self, identity: Identity, secret: &str) -> Self {
        self.secrets.insert(identity, secret_digest(secret));
        self
    }

    /// Every registered identity, sorted.
    pub fn identities(&self) -> impl Iterator<Item = &Identity> {
        self.secrets.keys()
    }

    /// Check a username/password pair and return the authenticated identity.
    pub fn authenticate(&self, username: &str, password: &str) -> Result<Identity> {
        let identity = Identity::from(username);
        let presented = secret_digest(password);

        let stored = self.secrets.get(&identity);
        let expected = stored.unwrap_or(&UNKNOWN_IDENTITY_DIGEST);
        let digest_eq: bool = expected[..].ct_eq(&presented[..]).into();

        if stored.is_some() && digest_eq {
            tracing::debug!(identity = %identity, "authenticated");
            Ok(identity)
        } else {
            tracing::warn!(username, "authentication failed");
            Err(PermsError::AuthenticationFailed)
        }
    }
}

impl std::fmt::Debug for CredentialTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.secrets.keys()).finish()
    }
}

fn secret_digest(secret: &str) -> [u8; 32] {
    Sha256::digest(secret.as_bytes()).into()
}
