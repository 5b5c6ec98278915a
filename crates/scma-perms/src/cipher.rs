//! The cipher service: one ChaCha20-Poly1305 context per process.
//!
//! Ciphertexts are self-describing tokens, URL-safe base64 of:
//!
//! ```text
//! version (1 byte) || nonce (12 bytes) || ciphertext || tag (16 bytes)
//! ```
//!
//! The version byte is bound as associated data, so it cannot be changed
//! without failing authentication. A fresh nonce is drawn for every
//! encryption, so encrypting the same plaintext twice gives different tokens.

use base64::{engine::general_purpose::URL_SAFE, Engine as _};
use chacha20poly1305::{
    aead::{Aead, KeyInit, Payload},
    ChaCha20Poly1305, Key, Nonce,
};

use scma_core::{Ciphertext, Content};

use crate::crypto::{EncryptionKey, EncryptionNonce, NONCE_LEN};
use crate::error::{PermsError, Result};

/// Token format version.
pub const TOKEN_VERSION: u8 = 0x01;

/// Poly1305 tag length.
pub const TAG_LEN: usize = 16;

const MIN_TOKEN_LEN: usize = 1 + NONCE_LEN + TAG_LEN;

/// Encrypts and decrypts artefact content under a single key.
///
/// Construct once at startup and share by reference with every handler.
pub struct Cipher {
    aead: ChaCha20Poly1305,
}

impl Cipher {
    /// Build the cipher context from a key.
    pub fn new(key: &EncryptionKey) -> Self {
        Self {
            aead: ChaCha20Poly1305::new(Key::from_slice(key.as_bytes())),
        }
    }

    /// Encrypt plaintext into a token.
    pub fn encrypt(&self, plaintext: &[u8]) -> Result<Ciphertext> {
        let nonce = EncryptionNonce::generate();
        let sealed = self
            .aead
            .encrypt(
                Nonce::from_slice(nonce.as_bytes()),
                Payload {
                    msg: plaintext,
                    aad: &[TOKEN_VERSION],
                },
            )
            .map_err(|e| PermsError::EncryptionError(e.to_string()))?;

        let mut token = Vec::with_capacity(1 + NONCE_LEN + sealed.len());
        token.push(TOKEN_VERSION);
        token.extend_from_slice(nonce.as_bytes());
        token.extend_from_slice(&sealed);

        Ok(Ciphertext::new(URL_SAFE.encode(token)))
    }

    /// Decrypt a token.
    ///
    /// Returns [`Content::Text`] when the plaintext is valid UTF-8 and
    /// [`Content::Bytes`] otherwise. Fails with
    /// [`PermsError::DecryptionError`] on malformed tokens, an unknown
    /// version, the wrong key, or any tampering.
    pub fn decrypt(&self, ciphertext: &Ciphertext) -> Result<Content> {
        let token = URL_SAFE
            .decode(ciphertext.as_str())
            .map_err(|e| PermsError::DecryptionError(format!("malformed token: {}", e)))?;

        if token.len() < MIN_TOKEN_LEN {
            return Err(PermsError::DecryptionError(format!(
                "token too short: {} bytes",
                token.len()
            )));
        }

        let (version, rest) = token.split_at(1);
        if version[0] != TOKEN_VERSION {
            return Err(PermsError::DecryptionError(format!(
                "unsupported token version: {:#04x}",
                version[0]
            )));
        }

        let (nonce, sealed) = rest.split_at(NONCE_LEN);
        let plaintext = self
            .aead
            .decrypt(
                Nonce::from_slice(nonce),
                Payload {
                    msg: sealed,
                    aad: &[TOKEN_VERSION],
                },
            )
            .map_err(|_| PermsError::DecryptionError("authentication tag mismatch".into()))?;

        Ok(Content::from_plaintext(plaintext))
    }
}

impl std::fmt::Debug for Cipher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Cipher(ChaCha20Poly1305)")
    }
}
