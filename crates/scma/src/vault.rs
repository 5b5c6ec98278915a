//! The Vault: authenticated, encrypted, audited access to artefacts.
//!
//! Every handler is a single-shot transaction against the repository:
//! authorize the action, load everything, act on one entry, save everything,
//! then append one audit line.

use scma_core::{
    Action, Artefact, ArtefactName, Content, ContentDigest, Identity, Timestamp,
};
use scma_perms::{AccessPolicy, Cipher, CredentialTable, KeyFile, PermsError};
use scma_store::{
    ArtefactRepository, AuditEntry, AuditLog, FileAuditLog, JsonFileRepository,
};

use crate::config::{CreatePolicy, VaultConfig};
use crate::error::{Result, VaultError};

/// The decrypted result of a read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtefactView {
    /// Who created the artefact.
    pub owner: Identity,
    /// Decrypted plaintext.
    pub content: Content,
    /// Digest stored alongside the ciphertext.
    pub digest: ContentDigest,
    /// Time of the last create or update.
    pub timestamp: Timestamp,
    /// Whether re-hashing `content` reproduces `digest`.
    pub digest_matches: bool,
}

/// The main Vault struct.
///
/// Owns the one [`Cipher`] for the process lifetime, plus the repository,
/// the audit log and the fixed credential and access tables.
pub struct Vault<R = JsonFileRepository, A = FileAuditLog> {
    cipher: Cipher,
    repository: R,
    audit: A,
    policy: AccessPolicy,
    credentials: CredentialTable,
    create_policy: CreatePolicy,
}

impl Vault {
    /// Open the file-backed vault described by `config`.
    ///
    /// Loads the key, creating the key file on first run. The data file is
    /// not touched until the first handler runs.
    pub fn open(config: &VaultConfig) -> Result<Self> {
        let key = KeyFile::new(&config.key_path)
            .load_key()
            .map_err(VaultError::KeyStore)?;

        tracing::debug!(
            data = %config.data_path.display(),
            log = %config.log_path.display(),
            "opening vault"
        );

        Ok(Vault::new(
            Cipher::new(&key),
            JsonFileRepository::new(&config.data_path),
            FileAuditLog::new(&config.log_path),
        )
        .with_create_policy(config.create_policy))
    }
}

impl<R: ArtefactRepository, A: AuditLog> Vault<R, A> {
    /// Assemble a vault from parts, with the built-in users and roles.
    pub fn new(cipher: Cipher, repository: R, audit: A) -> Self {
        Self {
            cipher,
            repository,
            audit,
            policy: AccessPolicy::builtin(),
            credentials: CredentialTable::builtin(),
            create_policy: CreatePolicy::default(),
        }
    }

    /// Replace the identity-to-role bindings.
    pub fn with_access_policy(mut self, policy: AccessPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Replace the credential table.
    pub fn with_credentials(mut self, credentials: CredentialTable) -> Self {
        self.credentials = credentials;
        self
    }

    /// Set the duplicate-name policy for `create`.
    pub fn with_create_policy(mut self, create_policy: CreatePolicy) -> Self {
        self.create_policy = create_policy;
        self
    }

    pub fn repository(&self) -> &R {
        &self.repository
    }

    pub fn audit(&self) -> &A {
        &self.audit
    }

    pub fn policy(&self) -> &AccessPolicy {
        &self.policy
    }

    pub fn create_policy(&self) -> CreatePolicy {
        self.create_policy
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Session
    // ─────────────────────────────────────────────────────────────────────────

    /// Check a username/password pair.
    pub fn login(&self, username: &str, password: &str) -> Result<Identity> {
        Ok(self.credentials.authenticate(username, password)?)
    }

    /// Whether `identity` may perform `action` at all. Used to shape menus.
    pub fn may(&self, identity: &Identity, action: Action) -> bool {
        self.policy.permissions_for(identity).contains(action)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Handlers
    // ─────────────────────────────────────────────────────────────────────────

    /// Encrypt `content` and store it under `name`, owned by `identity`.
    pub fn create(&self, identity: &Identity, name: &ArtefactName, content: &Content) -> Result<()> {
        self.policy
            .authorize(identity, Action::Create)
            .map_err(|e| self.denied(identity, Action::Create, name, e))?;

        let mut artefacts = self.repository.load()?;

        if self.create_policy == CreatePolicy::Reject && artefacts.contains_key(name) {
            tracing::warn!(identity = %identity, artefact = %name, "create refused, name taken");
            return Err(VaultError::Conflict(name.clone()));
        }

        let ciphertext = self.cipher.encrypt(content.as_bytes())?;
        let artefact = Artefact::new(identity.clone(), ciphertext, content.digest(), Timestamp::now());
        artefacts.insert(name.clone(), artefact);

        self.repository.save(&artefacts)?;
        self.record(identity, Action::Create, name)?;

        tracing::info!(identity = %identity, artefact = %name, bytes = content.len(), "artefact created");
        Ok(())
    }

    /// Decrypt the artefact stored under `name`.
    ///
    /// A digest mismatch is reported through [`ArtefactView::digest_matches`]
    /// and does not fail the read.
    pub fn read(&self, identity: &Identity, name: &ArtefactName) -> Result<ArtefactView> {
        self.policy
            .authorize(identity, Action::Read)
            .map_err(|e| self.denied(identity, Action::Read, name, e))?;

        let artefacts = self.repository.load()?;
        let artefact = artefacts
            .get(name)
            .ok_or_else(|| VaultError::NotFound(name.clone()))?;

        self.policy
            .authorize_on(identity, Action::Read, &artefact.owner)
            .map_err(|e| self.denied(identity, Action::Read, name, e))?;

        let content = self.cipher.decrypt(&artefact.content)?;
        let digest_matches = content.digest() == artefact.digest;
        if !digest_matches {
            tracing::warn!(artefact = %name, stored = %artefact.digest, "digest mismatch on read");
        }

        self.record(identity, Action::Read, name)?;

        tracing::info!(identity = %identity, artefact = %name, "artefact read");
        Ok(ArtefactView {
            owner: artefact.owner.clone(),
            content,
            digest: artefact.digest,
            timestamp: artefact.timestamp,
            digest_matches,
        })
    }

    /// Replace the content of an existing artefact. The owner is unchanged.
    pub fn update(&self, identity: &Identity, name: &ArtefactName, content: &Content) -> Result<()> {
        self.policy
            .authorize(identity, Action::Update)
            .map_err(|e| self.denied(identity, Action::Update, name, e))?;

        let mut artefacts = self.repository.load()?;
        let artefact = artefacts
            .get_mut(name)
            .ok_or_else(|| VaultError::NotFound(name.clone()))?;

        self.policy
            .authorize_on(identity, Action::Update, &artefact.owner)
            .map_err(|e| self.denied(identity, Action::Update, name, e))?;

        let ciphertext = self.cipher.encrypt(content.as_bytes())?;
        artefact.rewrite(ciphertext, content.digest(), Timestamp::now());

        self.repository.save(&artefacts)?;
        self.record(identity, Action::Update, name)?;

        tracing::info!(identity = %identity, artefact = %name, bytes = content.len(), "artefact updated");
        Ok(())
    }

    /// Remove an artefact. Elevated role only.
    pub fn delete(&self, identity: &Identity, name: &ArtefactName) -> Result<()> {
        self.policy
            .authorize(identity, Action::Delete)
            .map_err(|e| self.denied(identity, Action::Delete, name, e))?;

        let mut artefacts = self.repository.load()?;
        let owner = match artefacts.get(name) {
            Some(artefact) => artefact.owner.clone(),
            None => return Err(VaultError::NotFound(name.clone())),
        };

        self.policy
            .authorize_on(identity, Action::Delete, &owner)
            .map_err(|e| self.denied(identity, Action::Delete, name, e))?;

        artefacts.remove(name);

        self.repository.save(&artefacts)?;
        self.record(identity, Action::Delete, name)?;

        tracing::info!(identity = %identity, artefact = %name, "artefact deleted");
        Ok(())
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Internal Helpers
    // ─────────────────────────────────────────────────────────────────────────

    fn record(&self, identity: &Identity, action: Action, name: &ArtefactName) -> Result<()> {
        let entry = AuditEntry::now(identity.clone(), action, name.clone());
        self.audit.record(&entry).map_err(|source| {
            tracing::warn!(identity = %identity, action = %action, artefact = %name, "audit write failed");
            VaultError::Audit { action, source }
        })
    }

    fn denied(
        &self,
        identity: &Identity,
        action: Action,
        name: &ArtefactName,
        err: PermsError,
    ) -> VaultError {
        tracing::warn!(identity = %identity, action = %action, artefact = %name, "denied: {}", err);
        err.into()
    }
}

impl<R, A> std::fmt::Debug for Vault<R, A> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Vault")
            .field("policy", &self.policy)
            .field("create_policy", &self.create_policy)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scma_perms::{EncryptionKey, Role};
    use scma_store::{MemoryAuditLog, MemoryRepository};

    fn vault() -> Vault<MemoryRepository, MemoryAuditLog> {
        let key = EncryptionKey::from_bytes([7u8; 32]);
        Vault::new(Cipher::new(&key), MemoryRepository::new(), MemoryAuditLog::new())
    }

    fn name(s: &str) -> ArtefactName {
        ArtefactName::parse(s).unwrap()
    }

    fn admin() -> Identity {
        Identity::from("admin")
    }

    fn user() -> Identity {
        Identity::from("user")
    }

    #[test]
    fn test_create_then_read() {
        let vault = vault();
        vault.create(&user(), &name("verse"), &Content::from("hello")).unwrap();

        let view = vault.read(&user(), &name("verse")).unwrap();
        assert_eq!(view.content, Content::from("hello"));
        assert_eq!(view.digest, ContentDigest::of(b"hello"));
        assert_eq!(view.owner, user());
        assert!(view.digest_matches);
        assert_eq!(vault.audit().len(), 2);
    }

    #[test]
    fn test_ciphertext_is_not_plaintext() {
        let vault = vault();
        vault.create(&user(), &name("verse"), &Content::from("hello")).unwrap();

        let stored = vault.repository().snapshot();
        let artefact = &stored[&name("verse")];
        assert!(!artefact.content.as_str().contains("hello"));
    }

    #[test]
    fn test_update_keeps_owner() {
        let vault = vault();
        vault.create(&user(), &name("verse"), &Content::from("v1")).unwrap();
        vault.update(&admin(), &name("verse"), &Content::from("v2")).unwrap();

        let view = vault.read(&user(), &name("verse")).unwrap();
        assert_eq!(view.owner, user());
        assert_eq!(view.content, Content::from("v2"));
    }

    #[test]
    fn test_non_owner_denied() {
        let vault = vault()
            .with_access_policy(AccessPolicy::builtin().bind(Identity::from("guest"), Role::User));
        vault.create(&user(), &name("verse"), &Content::from("v1")).unwrap();

        let guest = Identity::from("guest");
        assert!(matches!(
            vault.read(&guest, &name("verse")),
            Err(VaultError::Unauthorized(_))
        ));
        assert!(matches!(
            vault.update(&guest, &name("verse"), &Content::from("x")),
            Err(VaultError::Unauthorized(_))
        ));
        assert_eq!(vault.audit().len(), 1);
    }

    #[test]
    fn test_unknown_identity_denied_before_load() {
        let vault = vault();
        let stranger = Identity::from("mallory");
        assert!(matches!(
            vault.create(&stranger, &name("x"), &Content::from("x")),
            Err(VaultError::Unauthorized(_))
        ));
        assert_eq!(vault.repository().save_count(), 0);
    }

    #[test]
    fn test_user_cannot_delete_own() {
        let vault = vault();
        vault.create(&user(), &name("verse"), &Content::from("v1")).unwrap();

        assert!(matches!(
            vault.delete(&user(), &name("verse")),
            Err(VaultError::Unauthorized(_))
        ));
        assert_eq!(vault.repository().snapshot().len(), 1);
        assert_eq!(vault.repository().save_count(), 1);
    }

    #[test]
    fn test_admin_deletes() {
        let vault = vault();
        vault.create(&user(), &name("verse"), &Content::from("v1")).unwrap();
        vault.delete(&admin(), &name("verse")).unwrap();

        assert!(vault.repository().snapshot().is_empty());
        assert!(matches!(
            vault.read(&admin(), &name("verse")),
            Err(VaultError::NotFound(_))
        ));
    }

    #[test]
    fn test_missing_name() {
        let vault = vault();
        assert!(matches!(
            vault.read(&user(), &name("ghost")),
            Err(VaultError::NotFound(_))
        ));
        assert!(matches!(
            vault.update(&user(), &name("ghost"), &Content::from("x")),
            Err(VaultError::NotFound(_))
        ));
        assert!(matches!(
            vault.delete(&admin(), &name("ghost")),
            Err(VaultError::NotFound(_))
        ));
        assert!(vault.audit().is_empty());
        assert_eq!(vault.repository().save_count(), 0);
    }

    #[test]
    fn test_overwrite_replaces_owner() {
        let vault = vault();
        vault.create(&user(), &name("verse"), &Content::from("mine")).unwrap();
        vault.create(&admin(), &name("verse"), &Content::from("theirs")).unwrap();

        let view = vault.read(&admin(), &name("verse")).unwrap();
        assert_eq!(view.owner, admin());
        assert_eq!(view.content, Content::from("theirs"));
    }

    #[test]
    fn test_reject_duplicate() {
        let vault = vault().with_create_policy(CreatePolicy::Reject);
        vault.create(&user(), &name("verse"), &Content::from("mine")).unwrap();

        assert!(matches!(
            vault.create(&admin(), &name("verse"), &Content::from("theirs")),
            Err(VaultError::Conflict(_))
        ));
        assert_eq!(vault.read(&user(), &name("verse")).unwrap().content, Content::from("mine"));
    }

    #[test]
    fn test_digest_mismatch_is_reported_not_fatal() {
        let vault = vault();
        vault.create(&user(), &name("verse"), &Content::from("hello")).unwrap();

        let mut stored = vault.repository().snapshot();
        let artefact = stored.get_mut(&name("verse")).unwrap();
        artefact.digest = ContentDigest::of(b"something else");
        vault.repository().save(&stored).unwrap();

        let view = vault.read(&user(), &name("verse")).unwrap();
        assert!(!view.digest_matches);
        assert_eq!(view.content, Content::from("hello"));
    }

    #[test]
    fn test_login() {
        let vault = vault();
        assert_eq!(vault.login("admin", "admin123").unwrap(), admin());
        assert!(matches!(
            vault.login("admin", "user123"),
            Err(VaultError::AuthenticationFailure)
        ));
    }

    #[test]
    fn test_custom_credentials() {
        let vault = vault().with_credentials(CredentialTable::new().with_secret(user(), "s3cret"));
        assert_eq!(vault.login("user", "s3cret").unwrap(), user());
        assert!(matches!(
            vault.login("admin", "admin123"),
            Err(VaultError::AuthenticationFailure)
        ));
    }

    #[test]
    fn test_may() {
        let vault = vault();
        assert!(vault.may(&admin(), Action::Delete));
        assert!(!vault.may(&user(), Action::Delete));
        assert!(vault.may(&user(), Action::Update));
        assert!(!vault.may(&Identity::from("nobody"), Action::Read));
    }
}
