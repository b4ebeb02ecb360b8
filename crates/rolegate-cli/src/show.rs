//! # Show and List Subcommands
//!
//! Read-only views over the state file, printed as JSON.

use std::path::Path;

use anyhow::bail;
use clap::{Args, ValueEnum};
use uuid::Uuid;

use rolegate_core::RequestId;
use rolegate_workflow::WorkflowStore;

use crate::state;

/// Arguments for the show subcommand.
#[derive(Args, Debug)]
pub struct ShowArgs {
    /// Request to print.
    #[arg(long)]
    pub request: Uuid,
}

pub fn run_show(args: &ShowArgs, state_path: &Path) -> anyhow::Result<()> {
    let store = state::load(state_path)?;
    let id = RequestId(args.request);
    let Some(request) = store.request(&id)? else {
        bail!("no request {id}");
    };
    println!("{}", serde_json::to_string_pretty(&request)?);
    Ok(())
}

#[derive(ValueEnum, Clone, Copy, Debug)]
pub enum ListEntity {
    Users,
    Requests,
    Profiles,
}

/// Arguments for the list subcommand.
#[derive(Args, Debug)]
pub struct ListArgs {
    /// What to list.
    #[arg(value_enum)]
    pub entity: ListEntity,
}

pub fn run_list(args: &ListArgs, state_path: &Path) -> anyhow::Result<()> {
    let store = state::load(state_path)?;
    let json = match args.entity {
        ListEntity::Users => serde_json::to_string_pretty(&store.users())?,
        ListEntity::Requests => serde_json::to_string_pretty(&store.requests())?,
        ListEntity::Profiles => serde_json::to_string_pretty(&store.profiles())?,
    };
    println!("{json}");
    Ok(())
}
