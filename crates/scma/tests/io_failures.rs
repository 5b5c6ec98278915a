//! Data-file and log-file I/O failures.

use std::fs;

use scma::store::{ArtefactRepository, JsonFileRepository};
use scma::{Action, Content, Vault, VaultConfig, VaultError};
use scma_testkit::{admin, name, user};
use tempfile::TempDir;

fn config_with_missing_log_dir(dir: &TempDir) -> VaultConfig {
    let mut config = VaultConfig::in_dir(dir.path());
    config.log_path = dir.path().join("no-such-dir").join("scma_log.txt");
    config
}

#[test]
fn test_audit_failure_after_create_keeps_change() {
    let dir = TempDir::new().unwrap();
    let config = config_with_missing_log_dir(&dir);
    let vault = Vault::open(&config).unwrap();

    let err = vault
        .create(&user(), &name("song"), &Content::from("saved anyway"))
        .unwrap_err();
    assert!(matches!(
        err,
        VaultError::Audit {
            action: Action::Create,
            ..
        }
    ));
    assert!(!err.is_fatal());

    let stored = JsonFileRepository::new(&config.data_path).load().unwrap();
    assert!(stored.contains_key(&name("song")));
}

#[test]
fn test_audit_failure_on_update_and_delete() {
    let dir = TempDir::new().unwrap();
    let config = config_with_missing_log_dir(&dir);
    let vault = Vault::open(&config).unwrap();
    let _ = vault.create(&user(), &name("song"), &Content::from("v1"));

    let err = vault
        .update(&user(), &name("song"), &Content::from("v2"))
        .unwrap_err();
    assert!(matches!(err, VaultError::Audit { action: Action::Update, .. }));

    // The read itself is refused because it cannot be audited.
    assert!(matches!(
        vault.read(&user(), &name("song")),
        Err(VaultError::Audit { action: Action::Read, .. })
    ));

    let err = vault.delete(&admin(), &name("song")).unwrap_err();
    assert!(matches!(err, VaultError::Audit { action: Action::Delete, .. }));
    assert!(JsonFileRepository::new(&config.data_path)
        .load()
        .unwrap()
        .is_empty());
}

#[test]
fn test_data_path_is_a_directory() {
    let dir = TempDir::new().unwrap();
    let config = VaultConfig::in_dir(dir.path());
    fs::create_dir(&config.data_path).unwrap();
    let vault = Vault::open(&config).unwrap();

    let err = vault.read(&user(), &name("song")).unwrap_err();
    assert!(matches!(err, VaultError::Storage(_)));
    assert!(!err.is_fatal());

    let err = vault
        .create(&user(), &name("song"), &Content::from("x"))
        .unwrap_err();
    assert!(matches!(err, VaultError::Storage(_)));
    assert!(!dir.path().join("scma_log.txt").exists());
}

#[test]
fn test_unwritable_data_dir_is_storage_error() {
    let dir = TempDir::new().unwrap();
    let mut config = VaultConfig::in_dir(dir.path());
    config.data_path = dir.path().join("missing").join("scma_data.json");
    let vault = Vault::open(&config).unwrap();

    let err = vault
        .create(&user(), &name("song"), &Content::from("x"))
        .unwrap_err();
    assert!(matches!(err, VaultError::Storage(_)));
    assert!(!err.is_fatal());
    // Nothing saved, so nothing audited.
    assert!(!config.log_path.exists());
}
