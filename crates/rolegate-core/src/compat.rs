//! # Role-Compatibility Engine
//!
//! Pure rule functions deciding whether a candidate role set is internally
//! consistent, and computing the role set that results from an elevation or
//! swap. No state, no I/O, deterministic and total over any finite set.
//!
//! ## The Rule
//!
//! AUTHORITY is mutually exclusive with the whole business cluster
//! {PARTNER, DISTRIBUTOR, ADMIN}. A rejection names *every* offending role
//! found, not just the first, so a caller can fix the whole set in one
//! round trip. The empty set and every single-role set are compatible.
//!
//! ## One Transition Function
//!
//! The "remove only the named role" vs. "remove the whole business cluster
//! when the target is AUTHORITY" asymmetry is easy to re-break when the
//! branch is duplicated. [`next_role_set`] is the single shared encoding;
//! both creation-time validation and approval-time application call it.

use thiserror::Error;

use crate::role::{Role, RoleSet};

/// The business-role cluster AUTHORITY cannot coexist with.
pub const AUTHORITY_EXCLUSIVE: [Role; 3] = [Role::Partner, Role::Distributor, Role::Admin];

/// A compatibility-engine rejection, carrying every role that conflicts
/// with AUTHORITY in the candidate set, in canonical order.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("AUTHORITY cannot be combined with: {}", conflict_list(.conflicting))]
pub struct RoleConflict {
    /// The offending roles found alongside AUTHORITY.
    pub conflicting: Vec<Role>,
}

fn conflict_list(roles: &[Role]) -> String {
    roles
        .iter()
        .map(Role::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Decide whether a candidate role set is legal.
///
/// Returns `Ok(())` for every set that does not pair AUTHORITY with a
/// member of [`AUTHORITY_EXCLUSIVE`]; otherwise returns a [`RoleConflict`]
/// naming all offending roles found.
pub fn check_compatibility(candidate: &RoleSet) -> Result<(), RoleConflict> {
    if !candidate.contains(Role::Authority) {
        return Ok(());
    }

    let conflicting: Vec<Role> = AUTHORITY_EXCLUSIVE
        .into_iter()
        .filter(|role| candidate.contains(*role))
        .collect();

    if conflicting.is_empty() {
        Ok(())
    } else {
        Err(RoleConflict { conflicting })
    }
}

/// Compute the role set resulting from granting `requested`.
///
/// For a swap (`role_to_remove` present) into AUTHORITY, the *entire*
/// business cluster is dropped — not just the role nominally being
/// removed — because AUTHORITY excludes the whole cluster. Any other swap
/// drops only `role_to_remove`. A plain elevation drops nothing. The
/// requested role is always present in the result.
///
/// This function does not validate the result; run the outcome through
/// [`check_compatibility`] to decide whether the transition is legal.
pub fn next_role_set(current: &RoleSet, requested: Role, role_to_remove: Option<Role>) -> RoleSet {
    match role_to_remove {
        Some(_) if requested == Role::Authority => {
            current.without_all(&AUTHORITY_EXCLUSIVE).with(requested)
        }
        Some(removed) => current.without(removed).with(requested),
        None => current.with(requested),
    }
}
