//! # Role Taxonomy — Single Source of Truth
//!
//! Defines the `Role` enum with the five membership roles, and `RoleSet`,
//! the immutable set-of-roles value type. This is the ONE role definition
//! used across the entire platform. Every `match` on `Role` must be
//! exhaustive — adding a new role forces every consumer (the compatibility
//! engine, the profile provisioner, the workflow) to handle it at compile
//! time rather than falling through a stringly-typed lookup.
//!
//! ## Role Set Semantics
//!
//! A user holds an unordered set of zero or more roles. Multiplicity, not
//! mutual exclusivity, is the default — which combinations are legal is
//! decided by the compatibility engine in `compat.rs`, not here.
//!
//! `RoleSet` is a value type: `with`, `without`, and `without_all` return
//! new sets and never mutate in place. A transition that fails to persist
//! leaves no half-mutated set behind.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::str::FromStr;

use crate::error::CoreError;

/// A membership role a user may hold.
///
/// Declaration order is the canonical order: conflict reports and set
/// iteration both follow it.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    /// Ordinary member. Granted at registration, requires no approval.
    Client,
    /// Business partner.
    Partner,
    /// Zone distributor. Requires an assigned zone.
    Distributor,
    /// Law-enforcement authority. Mutually exclusive with the business
    /// cluster — see `compat.rs`.
    Authority,
    /// Platform administrator.
    Admin,
}

impl Role {
    /// Returns all roles in canonical order.
    pub fn all_roles() -> &'static [Role] {
        &[
            Self::Client,
            Self::Partner,
            Self::Distributor,
            Self::Authority,
            Self::Admin,
        ]
    }

    /// Returns the SCREAMING_SNAKE_CASE identifier for this role.
    ///
    /// This must match the serde serialization format and the role tags
    /// stored on persisted user records.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Client => "CLIENT",
            Self::Partner => "PARTNER",
            Self::Distributor => "DISTRIBUTOR",
            Self::Authority => "AUTHORITY",
            Self::Admin => "ADMIN",
        }
    }

    /// Whether this role requires admin approval to acquire.
    ///
    /// CLIENT is granted at registration; everything else goes through
    /// the role-request workflow.
    pub fn requires_approval(&self) -> bool {
        !matches!(self, Self::Client)
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = CoreError;

    /// Parse a role from its SCREAMING_SNAKE_CASE identifier.
    ///
    /// Accepts the same identifiers produced by [`Role::as_str()`].
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "CLIENT" => Ok(Self::Client),
            "PARTNER" => Ok(Self::Partner),
            "DISTRIBUTOR" => Ok(Self::Distributor),
            "AUTHORITY" => Ok(Self::Authority),
            "ADMIN" => Ok(Self::Admin),
            other => Err(CoreError::UnknownRole(other.to_string())),
        }
    }
}

// ─── RoleSet ────────────────────────────────────────────────────────

/// An immutable set of roles held by a user.
///
/// Iteration follows the canonical role order regardless of insertion
/// order. All "mutating" operations return a new set.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RoleSet(BTreeSet<Role>);

impl RoleSet {
    /// The empty role set.
    pub fn empty() -> Self {
        Self(BTreeSet::new())
    }

    /// A set holding exactly one role.
    pub fn single(role: Role) -> Self {
        Self(BTreeSet::from([role]))
    }

    /// Whether the set contains `role`.
    pub fn contains(&self, role: Role) -> bool {
        self.0.contains(&role)
    }

    /// A new set with `role` added. Adding a held role is a no-op.
    pub fn with(&self, role: Role) -> Self {
        let mut next = self.0.clone();
        next.insert(role);
        Self(next)
    }

    /// A new set with `role` removed. Removing an absent role is a no-op.
    pub fn without(&self, role: Role) -> Self {
        let mut next = self.0.clone();
        next.remove(&role);
        Self(next)
    }

    /// A new set with every role in `roles` removed.
    pub fn without_all(&self, roles: &[Role]) -> Self {
        let mut next = self.0.clone();
        for role in roles {
            next.remove(role);
        }
        Self(next)
    }

    /// Iterate the roles in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = Role> + '_ {
        self.0.iter().copied()
    }

    /// Number of roles held.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether no roles are held.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<Role> for RoleSet {
    fn from_iter<I: IntoIterator<Item = Role>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl std::fmt::Display for RoleSet {
    /// Renders as `{CLIENT, PARTNER}` in canonical order.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{{")?;
        for (i, role) in self.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{role}")?;
        }
        write!(f, "}}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_roles_count() {
        assert_eq!(Role::all_roles().len(), 5);
    }

    #[test]
    fn test_all_roles_unique() {
        let mut seen = std::collections::HashSet::new();
        for r in Role::all_roles() {
            assert!(seen.insert(r), "duplicate role: {r}");
        }
    }

    #[test]
    fn test_as_str_roundtrip() {
        for role in Role::all_roles() {
            let parsed: Role = role.as_str().parse().unwrap();
            assert_eq!(*role, parsed);
        }
    }

    #[test]
    fn test_from_str_invalid() {
        assert!("client".parse::<Role>().is_err()); // case-sensitive
        assert!("OVERLORD".parse::<Role>().is_err());
        assert!("".parse::<Role>().is_err());
    }

    #[test]
    fn test_serde_format_matches_as_str() {
        for role in Role::all_roles() {
            let json = serde_json::to_string(role).unwrap();
            assert_eq!(json, format!("\"{}\"", role.as_str()));
        }
    }

    #[test]
    fn test_requires_approval() {
        assert!(!Role::Client.requires_approval());
        assert!(Role::Partner.requires_approval());
        assert!(Role::Admin.requires_approval());
    }

    // ---- RoleSet ----

    #[test]
    fn test_empty_set() {
        let set = RoleSet::empty();
        assert!(set.is_empty());
        assert_eq!(set.len(), 0);
        assert!(!set.contains(Role::Client));
    }

    #[test]
    fn test_with_is_persistent() {
        let base = RoleSet::single(Role::Client);
        let grown = base.with(Role::Partner);
        assert!(!base.contains(Role::Partner));
        assert!(grown.contains(Role::Partner));
        assert!(grown.contains(Role::Client));
    }

    #[test]
    fn test_with_held_role_is_noop() {
        let set = RoleSet::single(Role::Partner);
        assert_eq!(set.with(Role::Partner), set);
    }

    #[test]
    fn test_without_absent_role_is_noop() {
        let set = RoleSet::single(Role::Partner);
        assert_eq!(set.without(Role::Admin), set);
    }

    #[test]
    fn test_without_all() {
        let set: RoleSet = [Role::Client, Role::Partner, Role::Admin]
            .into_iter()
            .collect();
        let trimmed = set.without_all(&[Role::Partner, Role::Admin, Role::Distributor]);
        assert_eq!(trimmed, RoleSet::single(Role::Client));
    }

    #[test]
    fn test_iteration_is_canonical_order() {
        let set: RoleSet = [Role::Admin, Role::Client, Role::Distributor]
            .into_iter()
            .collect();
        let order: Vec<Role> = set.iter().collect();
        assert_eq!(order, vec![Role::Client, Role::Distributor, Role::Admin]);
    }

    #[test]
    fn test_display() {
        let set: RoleSet = [Role::Partner, Role::Client].into_iter().collect();
        assert_eq!(set.to_string(), "{CLIENT, PARTNER}");
        assert_eq!(RoleSet::empty().to_string(), "{}");
    }

    #[test]
    fn test_serde_roundtrip() {
        let set: RoleSet = [Role::Authority, Role::Client].into_iter().collect();
        let json = serde_json::to_string(&set).unwrap();
        let parsed: RoleSet = serde_json::from_str(&json).unwrap();
        assert_eq!(set, parsed);
    }
}
