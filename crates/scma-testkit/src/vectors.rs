//! Digest test vectors.
//!
//! The integrity digest is plain SHA-256 over the plaintext bytes, so the
//! stored `hash` field must match any standard SHA-256 tool.

use scma_core::ContentDigest;

/// A known plaintext and its digest.
#[derive(Debug, Clone)]
pub struct DigestVector {
    /// Human-readable name for the vector.
    pub name: &'static str,
    /// Plaintext bytes.
    pub plaintext: &'static [u8],
    /// Expected digest (lowercase hex).
    pub expected_hex: &'static str,
}

/// Get all digest vectors.
pub fn all_vectors() -> Vec<DigestVector> {
    vec![
        DigestVector {
            name: "empty",
            plaintext: b"",
            expected_hex: "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855",
        },
        DigestVector {
            name: "abc",
            plaintext: b"abc",
            expected_hex: "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad",
        },
        DigestVector {
            name: "hello",
            plaintext: b"hello",
            expected_hex: "2cf24dba5fb0a30e26e83b2ac5b9e29e1b161e5c1fa7425e73043362938b9824",
        },
        DigestVector {
            name: "quick brown fox",
            plaintext: b"The quick brown fox jumps over the lazy dog",
            expected_hex: "d7a8fbb307d7809469ca9abcb0082e4f8d5651e46d3cdb762d02d0bf37c9e592",
        },
    ]
}

/// Check every vector; returns the names of the ones that failed.
pub fn verify_all_vectors() -> Vec<&'static str> {
    all_vectors()
        .into_iter()
        .filter(|v| {
            let expected = hex::decode(v.expected_hex).ok();
            let actual = ContentDigest::of(v.plaintext);
            expected.as_deref() != Some(&actual.as_bytes()[..]) || actual.to_hex() != v.expected_hex
        })
        .map(|v| v.name)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vectors_pass() {
        assert!(verify_all_vectors().is_empty());
    }

    #[test]
    fn test_vector_names_unique() {
        let mut names: Vec<_> = all_vectors().iter().map(|v| v.name).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), all_vectors().len());
    }
}
