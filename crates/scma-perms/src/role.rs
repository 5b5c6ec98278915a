//! Roles and the permission sets they carry.
//!
//! The role table is fixed: `admin` can do everything and may act on any
//! artefact; `user` can create, read and update, and only on artefacts it owns.

use std::collections::BTreeSet;
use std::fmt;

use scma_core::Action;

/// A role an identity is bound to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    /// Elevated role: every action, ownership checks bypassed.
    Admin,
    /// Regular role: create, read, update; ownership enforced.
    User,
}

impl Role {
    /// The actions this role may perform.
    pub fn permissions(&self) -> PermissionSet {
        match self {
            Role::Admin => PermissionSet::from_iter(Action::ALL),
            Role::User => PermissionSet::from_iter([Action::Create, Action::Read, Action::Update]),
        }
    }

    /// Whether this role may read or update artefacts it does not own.
    pub const fn bypasses_ownership(&self) -> bool {
        matches!(self, Role::Admin)
    }

    /// Whether this is the elevated role. Only the elevated role may delete.
    pub const fn is_elevated(&self) -> bool {
        matches!(self, Role::Admin)
    }

    /// Lowercase role name.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::User => "user",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A set of permitted actions.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PermissionSet(BTreeSet<Action>);

impl PermissionSet {
    /// Check whether an action is permitted.
    pub fn contains(&self, action: Action) -> bool {
        self.0.contains(&action)
    }

    /// Whether nothing is permitted.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate permitted actions in menu order.
    pub fn iter(&self) -> impl Iterator<Item = Action> + '_ {
        self.0.iter().copied()
    }
}

impl FromIterator<Action> for PermissionSet {
    fn from_iter<I: IntoIterator<Item = Action>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}
