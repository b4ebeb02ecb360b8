//! # rolegate-state — Role-Request Lifecycle
//!
//! The `RoleRequest` entity and its status state machine:
//!
//! ```text
//! Pending ──▶ Approved (terminal)
//!    │
//!    └──▶ Rejected (terminal)
//! ```
//!
//! A request is created by a user action, decided exactly once by an
//! administrator, and never deleted. Once the status leaves PENDING it
//! never changes again — a second review attempt is an error, not a
//! silent overwrite.
//!
//! The entity owns its transitions: the workflow crate can only move a
//! request through [`RoleRequest::approve`] / [`RoleRequest::reject`],
//! both of which record reviewer identity, review time, and comments.

pub mod request;

pub use request::{RequestError, RequestStatus, ReviewEvidence, RoleRequest};
