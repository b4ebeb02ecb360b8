//! # Seed Subcommand
//!
//! Creates the entities the workflow operates on: users (with held roles
//! and an optional identity record), zones, and products. Prints the bare
//! UUID of the created entity for use in later commands.

use std::path::Path;

use clap::{Args, Subcommand};

use rolegate_core::{GovernmentId, PersonProfile, ProductId, Role, UserId, ZoneId};
use rolegate_workflow::UserRecord;

use crate::state;

/// Arguments for the seed subcommand.
#[derive(Args, Debug)]
pub struct SeedArgs {
    #[command(subcommand)]
    pub entity: SeedEntity,
}

#[derive(Subcommand, Debug)]
pub enum SeedEntity {
    /// Create a user.
    User(SeedUserArgs),
    /// Register a zone.
    Zone,
    /// Register a product.
    Product,
}

#[derive(Args, Debug)]
pub struct SeedUserArgs {
    /// Display handle.
    #[arg(long)]
    pub username: String,

    /// Held role; repeat the flag for several.
    #[arg(long = "role", value_name = "ROLE", default_values_t = vec![Role::Client])]
    pub roles: Vec<Role>,

    /// Government-issued identity number.
    #[arg(long)]
    pub government_id: Option<String>,

    /// Full legal name.
    #[arg(long)]
    pub full_name: Option<String>,

    /// Contact phone.
    #[arg(long)]
    pub phone: Option<String>,

    /// Postal address.
    #[arg(long)]
    pub address: Option<String>,
}

impl SeedUserArgs {
    /// An identity record when any identity flag was given, `None`
    /// otherwise.
    fn person(&self) -> Option<PersonProfile> {
        if self.government_id.is_none()
            && self.full_name.is_none()
            && self.phone.is_none()
            && self.address.is_none()
        {
            return None;
        }
        Some(PersonProfile {
            government_id: self.government_id.clone().map(GovernmentId::new),
            full_name: self.full_name.clone(),
            phone: self.phone.clone(),
            address: self.address.clone(),
        })
    }
}

pub fn run(args: &SeedArgs, state_path: &Path) -> anyhow::Result<()> {
    let store = state::load(state_path)?;

    match &args.entity {
        SeedEntity::User(user) => {
            let id = UserId::new();
            store.insert_user(UserRecord {
                id,
                username: user.username.clone(),
                roles: user.roles.iter().copied().collect(),
                person: user.person(),
            });
            println!("{}", id.as_uuid());
        }
        SeedEntity::Zone => {
            let id = ZoneId::new();
            store.insert_zone(id);
            println!("{}", id.as_uuid());
        }
        SeedEntity::Product => {
            let id = ProductId::new();
            store.insert_product(id);
            println!("{}", id.as_uuid());
        }
    }

    state::save(state_path, &store)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user_args() -> SeedUserArgs {
        SeedUserArgs {
            username: "nsoler".to_string(),
            roles: vec![Role::Client],
            government_id: None,
            full_name: None,
            phone: None,
            address: None,
        }
    }

    #[test]
    fn test_no_identity_flags_means_no_person_record() {
        assert!(user_args().person().is_none());
    }

    #[test]
    fn test_partial_identity_flags_build_a_partial_record() {
        let args = SeedUserArgs {
            full_name: Some("Nuria Soler".to_string()),
            ..user_args()
        };
        let person = args.person().unwrap();
        assert_eq!(person.full_name.as_deref(), Some("Nuria Soler"));
        assert!(person.government_id.is_none());
        assert!(!person.is_complete());
    }
}
