//! # Review Subcommand
//!
//! Applies an administrator's decision to a pending request and prints the
//! decided request as JSON.

use std::path::Path;

use clap::{Args, ValueEnum};
use uuid::Uuid;

use rolegate_core::{RequestId, UserId};
use rolegate_workflow::{ReviewAction, RoleRequestWorkflow};

use crate::state;

#[derive(ValueEnum, Clone, Copy, Debug)]
pub enum Decision {
    Approve,
    Reject,
}

/// Arguments for the review subcommand.
#[derive(Args, Debug)]
pub struct ReviewArgs {
    /// The decision.
    #[arg(value_enum)]
    pub decision: Decision,

    /// Reviewing admin's user id.
    #[arg(long)]
    pub reviewer: Uuid,

    /// Request to decide.
    #[arg(long)]
    pub request: Uuid,

    /// Reviewer comments, recorded on the request.
    #[arg(long)]
    pub comments: Option<String>,
}

pub fn run(args: &ReviewArgs, state_path: &Path) -> anyhow::Result<()> {
    let action = match args.decision {
        Decision::Approve => ReviewAction::Approve,
        Decision::Reject => ReviewAction::Reject,
    };

    let store = state::load(state_path)?;
    let workflow = RoleRequestWorkflow::new(store.clone());
    let decided = workflow.review_request(
        UserId(args.reviewer),
        RequestId(args.request),
        action,
        args.comments.clone(),
    )?;

    state::save(state_path, &store)?;
    println!("{}", serde_json::to_string_pretty(&decided)?);
    Ok(())
}
