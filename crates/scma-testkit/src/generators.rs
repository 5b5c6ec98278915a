//! Proptest generators for property-based testing.

use proptest::prelude::*;

use scma_core::{ArtefactName, Content};
use scma_perms::EncryptionKey;

/// Generate a valid artefact name.
pub fn artefact_name() -> impl Strategy<Value = ArtefactName> {
    "[a-zA-Z0-9][a-zA-Z0-9 _.-]{0,30}[a-zA-Z0-9]"
        .prop_filter_map("valid name", |s| ArtefactName::parse(s).ok())
}

/// Generate text content, including non-ASCII.
pub fn text_content(max_len: usize) -> impl Strategy<Value = Content> {
    proptest::collection::vec(any::<char>(), 0..=max_len)
        .prop_map(|chars| Content::Text(chars.into_iter().collect()))
}

/// Generate arbitrary binary content.
pub fn binary_content(max_len: usize) -> impl Strategy<Value = Content> {
    proptest::collection::vec(any::<u8>(), 0..=max_len).prop_map(Content::Bytes)
}

/// Generate either kind of content.
pub fn content(max_len: usize) -> impl Strategy<Value = Content> {
    prop_oneof![text_content(max_len), binary_content(max_len)]
}

/// Generate a random key.
pub fn encryption_key() -> impl Strategy<Value = EncryptionKey> {
    any::<[u8; 32]>().prop_map(EncryptionKey::from_bytes)
}
