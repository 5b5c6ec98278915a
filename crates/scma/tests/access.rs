//! Role and ownership rules.

use scma::perms::{AccessPolicy, Role};
use scma::{Content, Identity, VaultError};
use scma_testkit::{admin, memory_vault, name, user};

#[test]
fn test_owner_reads_and_updates() {
    let v = memory_vault();
    v.create(&user(), &name("mine"), &Content::from("x")).unwrap();

    assert!(v.read(&user(), &name("mine")).is_ok());
    assert!(v.update(&user(), &name("mine"), &Content::from("y")).is_ok());
}

#[test]
fn test_admin_bypasses_ownership() {
    let v = memory_vault();
    v.create(&user(), &name("theirs"), &Content::from("x")).unwrap();

    assert!(v.read(&admin(), &name("theirs")).is_ok());
    assert!(v.update(&admin(), &name("theirs"), &Content::from("y")).is_ok());
    assert!(v.delete(&admin(), &name("theirs")).is_ok());
}

#[test]
fn test_user_cannot_touch_admin_artefact() {
    let v = memory_vault();
    v.create(&admin(), &name("master"), &Content::from("x")).unwrap();

    assert!(matches!(
        v.read(&user(), &name("master")),
        Err(VaultError::Unauthorized(_))
    ));
    assert!(matches!(
        v.update(&user(), &name("master"), &Content::from("y")),
        Err(VaultError::Unauthorized(_))
    ));
    assert!(matches!(
        v.delete(&user(), &name("master")),
        Err(VaultError::Unauthorized(_))
    ));

    // Nothing changed, and only the create was audited.
    assert_eq!(v.read(&admin(), &name("master")).unwrap().content, Content::from("x"));
    assert_eq!(v.audit().len(), 2);
}

#[test]
fn test_delete_denied_even_when_missing() {
    let v = memory_vault();
    assert!(matches!(
        v.delete(&user(), &name("nothing")),
        Err(VaultError::Unauthorized(_))
    ));
}

#[test]
fn test_unbound_identity_is_denied_everything() {
    let v = memory_vault();
    let ghost = Identity::from("ghost");

    assert!(matches!(
        v.create(&ghost, &name("x"), &Content::from("x")),
        Err(VaultError::Unauthorized(_))
    ));
    assert!(matches!(
        v.read(&ghost, &name("x")),
        Err(VaultError::Unauthorized(_))
    ));
    assert!(v.repository().snapshot().is_empty());
}

#[test]
fn test_second_user_role() {
    let v = memory_vault().with_access_policy(
        AccessPolicy::builtin().bind(Identity::from("producer"), Role::User),
    );
    v.create(&user(), &name("song"), &Content::from("x")).unwrap();
    v.create(&Identity::from("producer"), &name("beat"), &Content::from("y")).unwrap();

    assert!(matches!(
        v.read(&Identity::from("producer"), &name("song")),
        Err(VaultError::Unauthorized(_))
    ));
    assert!(matches!(
        v.read(&user(), &name("beat")),
        Err(VaultError::Unauthorized(_))
    ));
}

#[test]
fn test_login_builtin_accounts() {
    let v = memory_vault();
    assert_eq!(v.login("admin", "admin123").unwrap(), admin());
    assert_eq!(v.login("user", "user123").unwrap(), user());

    for (u, p) in [("admin", "wrong"), ("user", "admin123"), ("root", "root"), ("", "")] {
        assert!(matches!(v.login(u, p), Err(VaultError::AuthenticationFailure)));
    }
}
