//! # Store Collaborator Boundary
//!
//! The workflow talks to persistence through one trait. Everything the
//! relational store does for the workflow — lookups, the pending-request
//! probe, and the atomic review commit — is here; nothing else in this
//! crate performs I/O.
//!
//! ## Atomicity Contract
//!
//! [`WorkflowStore::commit_review`] is the single atomic unit of a review:
//! the status compare-and-set, the optional profile-record insert, and the
//! optional role-set replacement either all commit or none do. The
//! implementation must serialize the read-status/transition-status
//! sequence per request, so a second concurrent reviewer observes the
//! terminal status and gets `InvalidState` instead of double-applying a
//! grant.

use serde::{Deserialize, Serialize};

use rolegate_core::{
    GovernmentId, PersonProfile, ProductId, ProfileKind, ProfileRecord, RequestId, Role, RoleSet,
    UserId, ZoneId,
};
use rolegate_state::{ReviewEvidence, RoleRequest};

use crate::error::WorkflowError;

/// A user account as the workflow sees it: identity, held roles, and the
/// optional base person record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    pub id: UserId,
    /// Display handle; not used by the decision logic.
    pub username: String,
    pub roles: RoleSet,
    pub person: Option<PersonProfile>,
}

/// The decision being committed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReviewDecision {
    Approve,
    Reject,
}

/// Everything a review commit applies atomically.
///
/// For a rejection only the status transition and review evidence apply;
/// `new_roles` and `new_profile` must be `None`. For an approval the
/// workflow stages the replacement role set and, when provisioning
/// created one, the new profile record.
#[derive(Debug, Clone)]
pub struct CommitReview {
    pub request_id: RequestId,
    pub decision: ReviewDecision,
    pub evidence: ReviewEvidence,
    /// Replacement role set for the requesting user (approval only).
    pub new_roles: Option<RoleSet>,
    /// Profile record to create (approval only, `None` when provisioning
    /// was an idempotent no-op or the role needs no profile).
    pub new_profile: Option<ProfileRecord>,
}

/// Keyed store operations the workflow consumes.
///
/// Implementations must be safe to share across threads. All methods are
/// synchronous; the in-memory implementation backs them with a single
/// `parking_lot` lock, a relational one would back them with row
/// operations and a transaction for [`commit_review`].
pub trait WorkflowStore: Send + Sync {
    /// Load a user with their roles and person record.
    fn user(&self, id: &UserId) -> Result<Option<UserRecord>, WorkflowError>;

    /// Load a role request.
    fn request(&self, id: &RequestId) -> Result<Option<RoleRequest>, WorkflowError>;

    /// Persist a newly created request.
    fn insert_request(&self, request: RoleRequest) -> Result<(), WorkflowError>;

    /// Whether a PENDING request for (user, role) already exists.
    fn has_pending_request(&self, user: &UserId, role: Role) -> Result<bool, WorkflowError>;

    /// Whether the zone exists.
    fn zone_exists(&self, zone: &ZoneId) -> Result<bool, WorkflowError>;

    /// Filter `ids` down to the products that exist, preserving order.
    fn existing_products(&self, ids: &[ProductId]) -> Result<Vec<ProductId>, WorkflowError>;

    /// Whether a profile record of `kind` exists for the person.
    fn profile_exists(
        &self,
        kind: ProfileKind,
        government_id: &GovernmentId,
    ) -> Result<bool, WorkflowError>;

    /// Atomically apply a review decision.
    ///
    /// Must re-read the request status under the same serialization that
    /// protects the write: if the request is no longer PENDING the commit
    /// fails with `InvalidState` and applies nothing. Returns the decided
    /// request.
    fn commit_review(&self, commit: CommitReview) -> Result<RoleRequest, WorkflowError>;
}
