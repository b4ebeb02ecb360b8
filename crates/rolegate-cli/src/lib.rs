//! # rolegate-cli — Role Request Command-Line Interface
//!
//! Drives the role request workflow from the shell against a JSON state
//! file, for development and operator use.
//!
//! ## Subcommands
//!
//! - `seed` — Create users, zones, and products
//! - `submit` — Submit an elevation or swap request
//! - `review` — Approve or reject a pending request
//! - `show` — Print one request
//! - `list` — Print users, requests, or profiles
//!
//! ## Crate Policy
//!
//! - CLI construction (argument parsing) is separated from business logic.
//! - Handler functions delegate to the workflow crate — no business logic
//!   here.
//! - Every mutating command loads the state file, runs one workflow
//!   operation, and writes the state file back.

pub mod review;
pub mod seed;
pub mod show;
pub mod state;
pub mod submit;
