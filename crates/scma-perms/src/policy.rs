//! Access policy: identity → role bindings and the checks built on them.
//!
//! Bindings are fixed when the policy is constructed. An identity with no
//! binding has an empty permission set, so every check fails closed.

use std::collections::HashMap;

use scma_core::{Action, Identity};

use crate::error::{PermsError, Result};
use crate::role::{PermissionSet, Role};

/// Identity → role bindings.
#[derive(Debug, Clone, Default)]
pub struct AccessPolicy {
    bindings: HashMap<Identity, Role>,
}

impl AccessPolicy {
    /// Create an empty policy. Nobody is permitted anything.
    pub fn new() -> Self {
        Self::default()
    }

    /// The built-in registry: `admin` → [`Role::Admin`], `user` → [`Role::User`].
    pub fn builtin() -> Self {
        Self::new()
            .bind(Identity::from("admin"), Role::Admin)
            .bind(Identity::from("user"), Role::User)
    }

    /// Bind an identity to a role, replacing any earlier binding.
    pub fn bind(mut self, identity: Identity, role: Role) -> Self {
        self.bindings.insert(identity, role);
        self
    }

    /// The role bound to an identity.
    pub fn role_of(&self, identity: &Identity) -> Option<Role> {
        self.bindings.get(identity).copied()
    }

    /// Everything an identity may do, ignoring ownership.
    pub fn permissions_for(&self, identity: &Identity) -> PermissionSet {
        self.role_of(identity)
            .map(|role| role.permissions())
            .unwrap_or_default()
    }

    /// Check that the identity's role includes `action`.
    pub fn authorize(&self, identity: &Identity, action: Action) -> Result<Role> {
        let role = self.role_of(identity).ok_or_else(|| {
            PermsError::PermissionDenied(format!("{} has no role", identity))
        })?;

        if !role.permissions().contains(action) {
            return Err(PermsError::PermissionDenied(format!(
                "role {} may not {}",
                role, action
            )));
        }

        Ok(role)
    }

    /// Check `action` against a specific artefact owned by `owner`.
    ///
    /// Re-runs the role check, then:
    /// - read/update: identity must be the owner, or hold a role that
    ///   bypasses ownership
    /// - delete: elevated role only, regardless of ownership
    pub fn authorize_on(&self, identity: &Identity, action: Action, owner: &Identity) -> Result<()> {
        let role = self.authorize(identity, action)?;

        if action == Action::Delete && !role.is_elevated() {
            return Err(PermsError::PermissionDenied(format!(
                "only an elevated role may delete (role {})",
                role
            )));
        }

        if action.requires_ownership() && identity != owner && !role.bypasses_ownership() {
            return Err(PermsError::PermissionDenied(format!(
                "{} does not own this artefact",
                identity
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn admin() -> Identity {
        Identity::from("admin")
    }

    fn user() -> Identity {
        Identity::from("user")
    }

    #[test]
    fn test_builtin_bindings() {
        let policy = AccessPolicy::builtin();
        assert_eq!(policy.role_of(&admin()), Some(Role::Admin));
        assert_eq!(policy.role_of(&user()), Some(Role::User));
        assert_eq!(policy.role_of(&Identity::from("mallory")), None);
    }

    #[test]
    fn test_unknown_identity_fails_closed() {
        let policy = AccessPolicy::builtin();
        let stranger = Identity::from("mallory");

        assert!(policy.permissions_for(&stranger).is_empty());
        for action in Action::ALL {
            assert!(policy.authorize(&stranger, action).is_err());
        }
    }

    #[test]
    fn test_user_cannot_delete_even_own_artefact() {
        let policy = AccessPolicy::builtin();
        assert!(policy.authorize(&user(), Action::Delete).is_err());
        assert!(policy.authorize_on(&user(), Action::Delete, &user()).is_err());
    }

    #[test]
    fn test_owner_can_read_and_update() {
        let policy = AccessPolicy::builtin();
        assert!(policy.authorize_on(&user(), Action::Read, &user()).is_ok());
        assert!(policy.authorize_on(&user(), Action::Update, &user()).is_ok());
    }

    #[test]
    fn test_non_owner_is_denied() {
        let policy = AccessPolicy::new()
            .bind(user(), Role::User)
            .bind(Identity::from("other"), Role::User);
        let other = Identity::from("other");

        assert!(matches!(
            policy.authorize_on(&other, Action::Read, &user()),
            Err(PermsError::PermissionDenied(_))
        ));
        assert!(policy.authorize_on(&other, Action::Update, &user()).is_err());
    }

    #[test]
    fn test_admin_bypasses_ownership() {
        let policy = AccessPolicy::builtin();
        for action in [Action::Read, Action::Update, Action::Delete] {
            assert!(policy.authorize_on(&admin(), action, &user()).is_ok());
        }
    }

    #[test]
    fn test_rebinding_replaces_role() {
        let policy = AccessPolicy::builtin().bind(user(), Role::Admin);
        assert!(policy.authorize(&user(), Action::Delete).is_ok());
    }
}
