//! # Role-Specific Profile Records
//!
//! Business records created when a privileged role is approved: one record
//! per person per role kind, keyed by government id. Distinct from the
//! user account — a person keeps their partner record even if their
//! account is later re-rolled.

use serde::{Deserialize, Serialize};

use crate::identity::{GovernmentId, ProductId, ZoneId};
use crate::role::Role;
use crate::temporal::Timestamp;

/// The role kinds that carry a profile record.
///
/// ADMIN and CLIENT deliberately have no variant here: approving them
/// provisions nothing, and the exhaustive `match` in
/// [`ProfileKind::of_role`] is where a newly added role must declare
/// whether it needs one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProfileKind {
    Partner,
    Distributor,
    Authority,
}

impl ProfileKind {
    /// The profile kind a role provisions, if any.
    pub fn of_role(role: Role) -> Option<ProfileKind> {
        match role {
            Role::Partner => Some(Self::Partner),
            Role::Distributor => Some(Self::Distributor),
            Role::Authority => Some(Self::Authority),
            Role::Admin | Role::Client => None,
        }
    }

    /// Returns the snake_case identifier for this kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Partner => "partner",
            Self::Distributor => "distributor",
            Self::Authority => "authority",
        }
    }
}

impl std::fmt::Display for ProfileKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Partner business record: identity and contact fields copied from the
/// person record at approval time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartnerProfile {
    pub government_id: GovernmentId,
    pub full_name: String,
    pub phone: String,
    pub address: String,
    pub created_at: Timestamp,
}

/// Distributor business record: a required zone, a business address, and
/// the products the distributor carries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DistributorProfile {
    pub government_id: GovernmentId,
    pub full_name: String,
    pub zone_id: ZoneId,
    pub address: String,
    pub products: Vec<ProductId>,
    pub created_at: Timestamp,
}

/// Authority record: zone of jurisdiction and rank. The rank feeds the
/// commission percentage computed downstream.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorityProfile {
    pub government_id: GovernmentId,
    pub full_name: String,
    pub zone_id: ZoneId,
    pub rank: i64,
    pub created_at: Timestamp,
}

/// A role-specific profile record of any kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ProfileRecord {
    Partner(PartnerProfile),
    Distributor(DistributorProfile),
    Authority(AuthorityProfile),
}

impl ProfileRecord {
    /// The kind tag of this record.
    pub fn kind(&self) -> ProfileKind {
        match self {
            Self::Partner(_) => ProfileKind::Partner,
            Self::Distributor(_) => ProfileKind::Distributor,
            Self::Authority(_) => ProfileKind::Authority,
        }
    }

    /// The government id this record is keyed by.
    pub fn government_id(&self) -> &GovernmentId {
        match self {
            Self::Partner(p) => &p.government_id,
            Self::Distributor(d) => &d.government_id,
            Self::Authority(a) => &a.government_id,
        }
    }
}
