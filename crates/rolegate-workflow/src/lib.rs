//! # Rolegate Workflow
//!
//! Orchestration layer of the role request subsystem: submitting a
//! request, reviewing it, and provisioning the role-specific profile an
//! approval creates.
//!
//! ## Design
//!
//! The workflow is pure orchestration over a [`WorkflowStore`] trait;
//! persistence lives behind that boundary. Validation runs twice on
//! purpose — once at submission against a fixed ordered checklist, and
//! again at approval against *current* state — and every approval effect
//! goes through one atomic [`WorkflowStore::commit_review`] call, so a
//! failed review never leaves a half-granted role.

pub mod error;
pub mod memory;
pub mod provision;
pub mod store;
pub mod workflow;

pub use error::WorkflowError;
pub use memory::{MemorySnapshot, MemoryStore};
pub use provision::plan_provision;
pub use store::{CommitReview, ReviewDecision, UserRecord, WorkflowStore};
pub use workflow::{CreateRequest, ReviewAction, RoleRequestWorkflow};
