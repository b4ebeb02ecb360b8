//! # rolegate-core — Foundational Domain Types
//!
//! Core vocabulary of the Rolegate membership platform. Everything in this
//! crate is pure data and pure functions — no I/O, no clocks other than
//! [`Timestamp::now`], no store access.
//!
//! ## Modules
//!
//! - **role** (`role.rs`): the `Role` taxonomy (single source of truth) and
//!   the immutable `RoleSet` value type.
//! - **compat** (`compat.rs`): the role-compatibility engine and the shared
//!   `next_role_set` transition function.
//! - **identity** (`identity.rs`): identifier newtypes. You cannot pass a
//!   `ZoneId` where a `UserId` is expected.
//! - **person** (`person.rs`): the base identity record required before a
//!   privileged role can be granted.
//! - **payload** (`payload.rs`): typed parsing of role-specific request
//!   payloads out of raw JSON.
//! - **profile** (`profile.rs`): role-specific business records (partner,
//!   distributor, authority) keyed by government id.
//! - **temporal** (`temporal.rs`): UTC-only, seconds-precision timestamps.
//!
//! ## Design
//!
//! Role sets are immutable values: every transition produces a new
//! `RoleSet`, and persisting the replacement is the caller's problem. This
//! keeps a failed persist from leaving a partially-mutated set in memory.

pub mod compat;
pub mod error;
pub mod identity;
pub mod payload;
pub mod person;
pub mod profile;
pub mod role;
pub mod temporal;

// ─── Role re-exports ────────────────────────────────────────────────

pub use role::{Role, RoleSet};

// ─── Compatibility re-exports ───────────────────────────────────────

pub use compat::{check_compatibility, next_role_set, RoleConflict, AUTHORITY_EXCLUSIVE};

// ─── Identity re-exports ────────────────────────────────────────────

pub use identity::{GovernmentId, ProductId, RequestId, UserId, ZoneId};

// ─── Person / payload / profile re-exports ──────────────────────────

pub use payload::{AuthorityPayload, DistributorPayload, PayloadError};
pub use person::PersonProfile;
pub use profile::{
    AuthorityProfile, DistributorProfile, PartnerProfile, ProfileKind, ProfileRecord,
};

// ─── Temporal / error re-exports ────────────────────────────────────

pub use error::CoreError;
pub use temporal::Timestamp;
