//! # Submit Subcommand
//!
//! Submits an elevation or swap request on behalf of a user and prints
//! the persisted PENDING request as JSON.

use std::path::Path;

use anyhow::Context;
use clap::Args;
use serde_json::Value;
use uuid::Uuid;

use rolegate_core::{Role, UserId};
use rolegate_workflow::{CreateRequest, RoleRequestWorkflow};

use crate::state;

/// Arguments for the submit subcommand.
#[derive(Args, Debug)]
pub struct SubmitArgs {
    /// Requesting user id.
    #[arg(long)]
    pub user: Uuid,

    /// Role being requested.
    #[arg(long)]
    pub role: Role,

    /// Role to drop in exchange, making this a swap request.
    #[arg(long)]
    pub remove: Option<Role>,

    /// Why the role is needed.
    #[arg(long)]
    pub justification: String,

    /// Role-specific payload as inline JSON, e.g.
    /// '{"zoneId": "...", "address": "..."}'.
    #[arg(long)]
    pub data: Option<String>,
}

pub fn run(args: &SubmitArgs, state_path: &Path) -> anyhow::Result<()> {
    let additional_data = match &args.data {
        Some(raw) => serde_json::from_str(raw).context("parsing --data as JSON")?,
        None => Value::Null,
    };

    let store = state::load(state_path)?;
    let workflow = RoleRequestWorkflow::new(store.clone());
    let request = workflow.create_request(CreateRequest {
        user_id: UserId(args.user),
        requested_role: args.role,
        role_to_remove: args.remove,
        justification: args.justification.clone(),
        additional_data,
    })?;

    state::save(state_path, &store)?;
    println!("{}", serde_json::to_string_pretty(&request)?);
    Ok(())
}
