//! # Role Request — Entity and Status Machine
//!
//! One record per elevation or swap ask. The status is the only mutable
//! part of the record after creation, and it moves exactly once:
//! `Pending → Approved` or `Pending → Rejected`. Both targets are
//! terminal.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use rolegate_core::{RequestId, Role, Timestamp, UserId};

// ─── Status ─────────────────────────────────────────────────────────

/// The lifecycle state of a role request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RequestStatus {
    /// Submitted, awaiting an admin decision.
    Pending,
    /// Granted (terminal).
    Approved,
    /// Denied (terminal).
    Rejected,
}

impl RequestStatus {
    /// Whether this status is terminal. Decisions are final.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Approved | Self::Rejected)
    }

    /// Returns the SCREAMING_SNAKE_CASE identifier for this status.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::Approved => "APPROVED",
            Self::Rejected => "REJECTED",
        }
    }
}

impl std::fmt::Display for RequestStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ─── Errors ─────────────────────────────────────────────────────────

/// Errors from request status transitions.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RequestError {
    /// The request has already been decided.
    #[error("request is {status}, decisions are final")]
    NotPending {
        /// The terminal status the request is in.
        status: RequestStatus,
    },
}

// ─── Review Evidence ────────────────────────────────────────────────

/// Who decided a request and what they said about it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewEvidence {
    /// The reviewing administrator.
    pub reviewer: UserId,
    /// Free-form admin comments.
    pub comments: Option<String>,
}

// ─── Role Request ───────────────────────────────────────────────────

/// One elevation or swap request.
///
/// `role_to_remove` marks a swap: the user asks to trade one held role for
/// the requested one. `additional_data` is the raw role-specific payload
/// as submitted; it is kept raw so the review path re-validates the actual
/// data instead of a verdict cached at submission time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoleRequest {
    pub id: RequestId,
    /// The requesting user.
    pub user_id: UserId,
    pub requested_role: Role,
    /// Present only for a swap request.
    pub role_to_remove: Option<Role>,
    pub justification: String,
    /// Role-specific payload (`Value::Null` when none was supplied).
    #[serde(default)]
    pub additional_data: Value,
    pub status: RequestStatus,
    pub created_at: Timestamp,
    pub reviewed_at: Option<Timestamp>,
    /// The admin who decided the request.
    pub reviewed_by: Option<UserId>,
    pub admin_comments: Option<String>,
}

impl RoleRequest {
    /// Create a new PENDING request.
    pub fn new(
        user_id: UserId,
        requested_role: Role,
        role_to_remove: Option<Role>,
        justification: impl Into<String>,
        additional_data: Value,
    ) -> Self {
        Self {
            id: RequestId::new(),
            user_id,
            requested_role,
            role_to_remove,
            justification: justification.into(),
            additional_data,
            status: RequestStatus::Pending,
            created_at: Timestamp::now(),
            reviewed_at: None,
            reviewed_by: None,
            admin_comments: None,
        }
    }

    /// Whether this is a swap request (trade one role for another).
    pub fn is_swap(&self) -> bool {
        self.role_to_remove.is_some()
    }

    /// Whether the request is still awaiting a decision.
    pub fn is_pending(&self) -> bool {
        self.status == RequestStatus::Pending
    }

    /// Approve the request (PENDING → APPROVED).
    pub fn approve(&mut self, evidence: ReviewEvidence) -> Result<(), RequestError> {
        self.require_pending()?;
        self.settle(RequestStatus::Approved, evidence);
        Ok(())
    }

    /// Reject the request (PENDING → REJECTED).
    pub fn reject(&mut self, evidence: ReviewEvidence) -> Result<(), RequestError> {
        self.require_pending()?;
        self.settle(RequestStatus::Rejected, evidence);
        Ok(())
    }

    fn require_pending(&self) -> Result<(), RequestError> {
        if self.status.is_terminal() {
            return Err(RequestError::NotPending {
                status: self.status,
            });
        }
        Ok(())
    }

    fn settle(&mut self, to: RequestStatus, evidence: ReviewEvidence) {
        self.status = to;
        self.reviewed_at = Some(Timestamp::now());
        self.reviewed_by = Some(evidence.reviewer);
        self.admin_comments = evidence.comments;
    }
}
