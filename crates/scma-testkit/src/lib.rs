//! # SCMA Testkit
//!
//! Testing utilities for SCMA.
//!
//! ## Overview
//!
//! This crate provides:
//!
//! - **Digest vectors**: Known SHA-256 outputs the integrity hasher must reproduce
//! - **Generators**: Proptest strategies for names, content and keys
//! - **Fixtures**: Vaults over a temporary directory or in memory
//!
//! ## Test Fixtures
//!
//! ```rust
//! use scma_testkit::fixtures::{admin, name, TestVault};
//! use scma::Content;
//!
//! let fixture = TestVault::new();
//! fixture.vault.create(&admin(), &name("demo"), &Content::from("hi")).unwrap();
//! assert_eq!(fixture.log_lines().len(), 1);
//! ```
//!
//! ## Property Testing
//!
//! ```rust,ignore
//! use proptest::prelude::*;
//! use scma_testkit::generators::content;
//!
//! proptest! {
//!     #[test]
//!     fn digest_is_deterministic(c in content(256)) {
//!         prop_assert_eq!(c.digest(), c.digest());
//!     }
//! }
//! ```

pub mod fixtures;
pub mod generators;
pub mod vectors;

pub use fixtures::{admin, memory_vault, name, user, MemoryVault, TestVault};
pub use vectors::{all_vectors, verify_all_vectors, DigestVector};
