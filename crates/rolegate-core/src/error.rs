//! # Core Error Types
//!
//! Errors raised by the pure domain types in this crate. All errors use
//! `thiserror` for derive-based `Display` and `Error` implementations.
//! Workflow-level failures (state violations, conflicts, store errors)
//! live in `rolegate-workflow`.

use thiserror::Error;

/// Errors from parsing and constructing core domain values.
#[derive(Error, Debug)]
pub enum CoreError {
    /// A role name did not match any known role.
    #[error("unknown role: {0:?}")]
    UnknownRole(String),

    /// A timestamp string was malformed or not UTC.
    #[error("invalid timestamp: {0}")]
    InvalidTimestamp(String),
}
