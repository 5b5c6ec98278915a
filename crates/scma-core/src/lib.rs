//! # SCMA Core
//!
//! Pure types for the SCMA artefact store: artefact records, plaintext
//! content, integrity digests, and timestamps.
//!
//! This crate contains no I/O, no storage, no key material. It is pure
//! computation over the data model that the other crates persist.
//!
//! ## Key Types
//!
//! - [`Action`] - One of create, read, update, delete
//! - [`Artefact`] - A stored record: owner, ciphertext, digest, timestamp
//! - [`ArtefactName`] - The unique key of an artefact in the repository
//! - [`Identity`] - An authenticated username
//! - [`Content`] - Plaintext, either UTF-8 text or raw bytes
//! - [`ContentDigest`] - SHA-256 of plaintext, serialized as lowercase hex
//!
//! ## Integrity
//!
//! The digest is always computed over plaintext before encryption. It is a
//! corruption signal, not a cryptographic binding to the ciphertext: the
//! cipher's own authentication tag is what detects ciphertext tampering.

pub mod action;
pub mod artefact;
pub mod content;
pub mod digest;
pub mod error;
pub mod types;
pub mod validation;

pub use action::Action;
pub use artefact::{Artefact, ArtefactMap};
pub use content::Content;
pub use digest::ContentDigest;
pub use error::{CoreError, Result};
pub use types::{ArtefactName, Ciphertext, Identity, Timestamp, TIMESTAMP_FORMAT};
pub use validation::validate_name;
