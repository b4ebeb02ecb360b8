//! # Person Identity Record
//!
//! The base identity record associated with a user account. Privileged
//! roles are only granted to people with a complete record: government id,
//! name, phone, and address must all be on file before a role request can
//! be created.

use serde::{Deserialize, Serialize};

use crate::identity::GovernmentId;

/// Identity fields required before a privileged role can be granted, in
/// report order.
const REQUIRED_IDENTITY_FIELDS: [&str; 4] = ["government_id", "full_name", "phone", "address"];

/// Base person record: who is behind a user account.
///
/// All fields are optional at registration time; completeness is only
/// enforced when the person asks for a privileged role.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonProfile {
    /// Government-issued identity number (DNI). Keys all role-specific
    /// profile records for this person.
    pub government_id: Option<GovernmentId>,
    /// Legal full name.
    pub full_name: Option<String>,
    /// Contact phone number.
    pub phone: Option<String>,
    /// Postal address.
    pub address: Option<String>,
}

impl PersonProfile {
    /// Names of the required identity fields that are absent or blank,
    /// in report order. Empty means the record is complete.
    pub fn missing_identity_fields(&self) -> Vec<String> {
        let present = [
            self.government_id
                .as_ref()
                .is_some_and(|id| !id.as_str().trim().is_empty()),
            is_filled(&self.full_name),
            is_filled(&self.phone),
            is_filled(&self.address),
        ];
        REQUIRED_IDENTITY_FIELDS
            .iter()
            .zip(present)
            .filter(|(_, ok)| !ok)
            .map(|(name, _)| (*name).to_string())
            .collect()
    }

    /// Whether every required identity field is on file.
    pub fn is_complete(&self) -> bool {
        self.missing_identity_fields().is_empty()
    }

    /// Every required identity field name, for reporting a wholly absent
    /// person record.
    pub fn all_required_fields() -> Vec<String> {
        REQUIRED_IDENTITY_FIELDS
            .iter()
            .map(|f| (*f).to_string())
            .collect()
    }
}

fn is_filled(field: &Option<String>) -> bool {
    field.as_ref().is_some_and(|s| !s.trim().is_empty())
}
