//! What happens when the stored data is damaged.

use base64::Engine as _;

use scma::store::ArtefactRepository;
use scma::{Content, VaultError};
use scma_testkit::{memory_vault, name, user, TestVault};

#[test]
fn test_flipped_ciphertext_byte_fails_decryption() {
    let v = memory_vault();
    v.create(&user(), &name("song"), &Content::from("secret lyrics")).unwrap();

    let mut stored = v.repository().snapshot();
    let artefact = stored.get_mut(&name("song")).unwrap();
    let engine = base64::engine::general_purpose::URL_SAFE;
    let mut raw = engine.decode(artefact.content.as_str()).unwrap();
    let last = raw.len() - 1;
    raw[last] ^= 0x01;
    artefact.content = scma::core::Ciphertext::new(engine.encode(&raw));
    v.repository().save(&stored).unwrap();

    assert!(matches!(
        v.read(&user(), &name("song")),
        Err(VaultError::Decryption(_))
    ));
    // Failed reads are not audited.
    assert_eq!(v.audit().len(), 1);
}

#[test]
fn test_garbage_ciphertext_fails_decryption() {
    let v = memory_vault();
    v.create(&user(), &name("song"), &Content::from("x")).unwrap();

    let mut stored = v.repository().snapshot();
    stored.get_mut(&name("song")).unwrap().content = scma::core::Ciphertext::new("not a token");
    v.repository().save(&stored).unwrap();

    assert!(matches!(
        v.read(&user(), &name("song")),
        Err(VaultError::Decryption(_))
    ));
}

#[test]
fn test_corrupt_data_file_is_fatal() {
    let t = TestVault::new();
    t.write_raw_data(b"{ this is not json");

    let err = t.vault.read(&user(), &name("anything")).unwrap_err();
    assert!(matches!(err, VaultError::CorruptStore(_)));
    assert!(err.is_fatal());

    let err = t
        .vault
        .create(&user(), &name("anything"), &Content::from("x"))
        .unwrap_err();
    assert!(err.is_fatal());

    // The corrupt file is left for a human to inspect.
    assert_eq!(
        std::fs::read(&t.config.data_path).unwrap(),
        b"{ this is not json"
    );
}

#[test]
fn test_bad_key_file_is_fatal() {
    let dir = tempfile::TempDir::new().unwrap();
    let config = scma::VaultConfig::in_dir(dir.path());
    std::fs::write(&config.key_path, "too short").unwrap();

    let err = scma::Vault::open(&config).unwrap_err();
    assert!(matches!(err, VaultError::KeyStore(_)));
    assert!(err.is_fatal());
}

#[test]
fn test_different_key_cannot_read() {
    let t = TestVault::new();
    t.vault.create(&user(), &name("song"), &Content::from("x")).unwrap();

    std::fs::remove_file(&t.config.key_path).unwrap();
    let t = t.reopen();

    assert!(matches!(
        t.vault.read(&user(), &name("song")),
        Err(VaultError::Decryption(_))
    ));
}
