//! # Role Request Workflow
//!
//! Orchestrates the two entry points of the request subsystem: a user
//! creating an elevation or swap request, and an administrator deciding
//! one. Validation order is fixed — each check is a hard stop — and the
//! review path re-runs every check against *current* state, because the
//! world may have moved since submission.
//!
//! Approval applies its effects (profile record, role-set replacement,
//! status transition) through one atomic store commit. If anything in the
//! sequence fails, the request stays PENDING and the user's roles are
//! untouched.

use serde_json::Value;

use rolegate_core::{check_compatibility, next_role_set, RequestId, Role, RoleSet, UserId};
use rolegate_state::{ReviewEvidence, RoleRequest};

use crate::error::WorkflowError;
use crate::store::{CommitReview, ReviewDecision, UserRecord, WorkflowStore};

/// Input to [`RoleRequestWorkflow::create_request`].
#[derive(Debug, Clone)]
pub struct CreateRequest {
    pub user_id: UserId,
    pub requested_role: Role,
    /// Present only for a swap request.
    pub role_to_remove: Option<Role>,
    pub justification: String,
    /// Role-specific payload; `Value::Null` when none.
    pub additional_data: Value,
}

/// An admin's decision on a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReviewAction {
    Approve,
    Reject,
}

/// The request workflow over a store of users, requests, profiles, and
/// catalog entities.
#[derive(Debug)]
pub struct RoleRequestWorkflow<S> {
    store: S,
}

impl<S: WorkflowStore> RoleRequestWorkflow<S> {
    /// Create a workflow over `store`.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Submit a new role request on behalf of a user.
    ///
    /// Checks run in order, each a hard stop: the role must be one that
    /// goes through approval at all, then role-state checks against the
    /// user's current set, the compatibility engine on the would-be set,
    /// identity-record completeness, the one-outstanding-request rule, and
    /// role-specific payload validation. On success the request is
    /// persisted PENDING and returned.
    pub fn create_request(&self, input: CreateRequest) -> Result<RoleRequest, WorkflowError> {
        if !input.requested_role.requires_approval() {
            return Err(WorkflowError::InvalidState(format!(
                "{} is granted at registration, not by request",
                input.requested_role
            )));
        }

        let user = self.load_user(&input.user_id)?;

        // Role-state checks plus compatibility on the post-transition set.
        // Both the swap and plain legs funnel through next_role_set so the
        // AUTHORITY-cluster special case cannot diverge from the
        // approval-time application.
        if let Some(removed) = input.role_to_remove {
            if !user.roles.contains(removed) {
                return Err(WorkflowError::InvalidState(format!(
                    "cannot swap out {removed}: role not held"
                )));
            }
            if user.roles.contains(input.requested_role) {
                return Err(WorkflowError::InvalidState(format!(
                    "user already holds {}",
                    input.requested_role
                )));
            }
            let next = next_role_set(&user.roles, input.requested_role, Some(removed));
            check_compatibility(&next)?;
        } else {
            if user.roles.contains(input.requested_role) {
                return Err(WorkflowError::InvalidState(format!(
                    "user already holds {}",
                    input.requested_role
                )));
            }
            let next = next_role_set(&user.roles, input.requested_role, None);
            check_compatibility(&next)?;
        }

        // Privileged roles require a complete identity record.
        let missing = match &user.person {
            Some(person) => person.missing_identity_fields(),
            None => rolegate_core::PersonProfile::all_required_fields(),
        };
        if !missing.is_empty() {
            return Err(WorkflowError::Precondition { missing });
        }

        // At most one outstanding request per user per target role.
        if self
            .store
            .has_pending_request(&user.id, input.requested_role)?
        {
            return Err(WorkflowError::Conflict {
                role: input.requested_role,
            });
        }

        validate_payload(input.requested_role, &input.additional_data)?;

        let request = RoleRequest::new(
            input.user_id,
            input.requested_role,
            input.role_to_remove,
            input.justification,
            input.additional_data,
        );
        self.store.insert_request(request.clone())?;

        tracing::info!(
            request = %request.id,
            user = %request.user_id,
            role = %request.requested_role,
            swap = request.is_swap(),
            "role request created"
        );
        Ok(request)
    }

    /// Decide a pending request.
    ///
    /// A rejection records the reviewer and comments and nothing else. An
    /// approval re-validates the stored payload, re-checks the user's
    /// current roles, plans provisioning, and commits profile + role set +
    /// status as one atomic unit. A request already decided fails with
    /// `InvalidState` — the commit re-checks this under the store's write
    /// serialization, so concurrent reviewers cannot double-apply.
    pub fn review_request(
        &self,
        reviewer: UserId,
        request_id: RequestId,
        action: ReviewAction,
        comments: Option<String>,
    ) -> Result<RoleRequest, WorkflowError> {
        let request = self
            .store
            .request(&request_id)?
            .ok_or_else(|| WorkflowError::NotFound(format!("{request_id}")))?;

        if !request.is_pending() {
            return Err(WorkflowError::InvalidState(format!(
                "request is {}, decisions are final",
                request.status
            )));
        }

        let evidence = ReviewEvidence { reviewer, comments };

        if action == ReviewAction::Reject {
            let decided = self.store.commit_review(CommitReview {
                request_id,
                decision: ReviewDecision::Reject,
                evidence,
                new_roles: None,
                new_profile: None,
            })?;
            tracing::info!(request = %request_id, reviewer = %reviewer, "role request rejected");
            return Ok(decided);
        }

        // The stored payload may have gone stale since submission;
        // validate the data, not a remembered verdict.
        validate_payload(request.requested_role, &request.additional_data)?;

        let user = self.load_user(&request.user_id)?;
        let next_roles = self.next_roles_for_approval(&user, &request)?;

        let person = user.person.as_ref().ok_or_else(|| WorkflowError::Precondition {
            missing: rolegate_core::PersonProfile::all_required_fields(),
        })?;
        let new_profile = crate::provision::plan_provision(
            &self.store,
            request.requested_role,
            person,
            &request.additional_data,
        )?;

        let decided = self.store.commit_review(CommitReview {
            request_id,
            decision: ReviewDecision::Approve,
            evidence,
            new_roles: Some(next_roles),
            new_profile,
        })?;

        tracing::info!(
            request = %request_id,
            reviewer = %reviewer,
            user = %decided.user_id,
            role = %decided.requested_role,
            "role request approved"
        );
        Ok(decided)
    }

    /// Re-check role state at approval time and compute the replacement
    /// role set.
    fn next_roles_for_approval(
        &self,
        user: &UserRecord,
        request: &RoleRequest,
    ) -> Result<RoleSet, WorkflowError> {
        if let Some(removed) = request.role_to_remove {
            if !user.roles.contains(removed) {
                return Err(WorkflowError::InvalidState(format!(
                    "cannot swap out {removed}: role no longer held"
                )));
            }
            if user.roles.contains(request.requested_role) {
                return Err(WorkflowError::InvalidState(format!(
                    "user already holds {}",
                    request.requested_role
                )));
            }
            let next = next_role_set(&user.roles, request.requested_role, Some(removed));
            check_compatibility(&next)?;
            Ok(next)
        } else if user.roles.contains(request.requested_role) {
            // Granted out-of-band since submission; approval is a no-op on
            // the role set.
            Ok(user.roles.clone())
        } else {
            let next = next_role_set(&user.roles, request.requested_role, None);
            check_compatibility(&next)?;
            Ok(next)
        }
    }

    fn load_user(&self, id: &UserId) -> Result<UserRecord, WorkflowError> {
        self.store
            .user(id)?
            .ok_or_else(|| WorkflowError::NotFound(format!("{id}")))
    }
}

/// Role-specific payload validation, shared by creation step and review
/// re-validation. Roles without a payload contract accept anything.
fn validate_payload(role: Role, additional_data: &Value) -> Result<(), WorkflowError> {
    match role {
        Role::Distributor => {
            rolegate_core::DistributorPayload::from_value(additional_data)?;
        }
        Role::Authority => {
            rolegate_core::AuthorityPayload::from_value(additional_data)?;
        }
        Role::Client | Role::Partner | Role::Admin => {}
    }
    Ok(())
}
