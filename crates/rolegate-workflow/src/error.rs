//! # Workflow Error Taxonomy
//!
//! Every expected failure of the request workflow, classified so a caller
//! can correct and resubmit. None of these should crash the process; the
//! one unexpected class (`Store`) still guarantees the request stayed
//! PENDING and the user's roles untouched, because nothing is applied
//! outside [`commit_review`](crate::store::WorkflowStore::commit_review).

use thiserror::Error;

use rolegate_core::{PayloadError, Role, RoleConflict};
use rolegate_state::RequestError;

/// Expected failure outcomes of `create_request` / `review_request`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WorkflowError {
    /// Malformed or missing payload fields. User-correctable.
    #[error(transparent)]
    Validation(#[from] PayloadError),

    /// The request or role state does not permit the action (role already
    /// held, swap role not held, request already decided).
    #[error("invalid state: {0}")]
    InvalidState(String),

    /// Compatibility-engine rejection, carrying the conflicting roles.
    #[error(transparent)]
    Incompatible(#[from] RoleConflict),

    /// A PENDING request for the same user and role already exists.
    #[error("a pending request for {role} already exists for this user")]
    Conflict {
        /// The role already asked for.
        role: Role,
    },

    /// The identity record is incomplete; privileged roles require a
    /// complete one.
    #[error("identity record incomplete, missing: {}", missing.join(", "))]
    Precondition {
        /// The absent identity fields, in report order.
        missing: Vec<String>,
    },

    /// A referenced entity (request, user, zone) does not exist.
    #[error("not found: {0}")]
    NotFound(String),

    /// Unexpected store-layer failure. Not retried here; the atomic commit
    /// guarantees nothing was partially applied.
    #[error("store failure: {0}")]
    Store(String),
}

impl From<RequestError> for WorkflowError {
    fn from(err: RequestError) -> Self {
        match err {
            RequestError::NotPending { status } => {
                Self::InvalidState(format!("request is {status}, decisions are final"))
            }
        }
    }
}
