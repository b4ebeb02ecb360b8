//! # Profile Provisioner
//!
//! Plans the role-specific profile record an approval creates. The planner
//! is side-effect free: it looks things up (existing profile, zone,
//! products) and returns the record to insert, or `None` when nothing
//! should be created. The atomic review commit is what actually writes it,
//! so a plan that fails partway leaves no trace.
//!
//! ## Idempotency
//!
//! Profile records are keyed per person per kind by government id. An
//! existing record short-circuits to a logged no-op: approving the same
//! (person, role) twice never creates a duplicate business record.

use rolegate_core::{
    AuthorityPayload, AuthorityProfile, DistributorPayload, DistributorProfile, PartnerProfile,
    PersonProfile, ProfileKind, ProfileRecord, Role, Timestamp,
};
use serde_json::Value;

use crate::error::WorkflowError;
use crate::store::WorkflowStore;

/// Plan the profile record to create for an approved `role`.
///
/// - PARTNER copies identity/contact fields from the person record.
/// - DISTRIBUTOR requires a resolvable zone and an address; requested
///   product ids that do not resolve are silently dropped. That leniency
///   is long-observed behavior, kept deliberately.
/// - AUTHORITY requires a resolvable zone and an integer rank.
/// - ADMIN and CLIENT provision nothing.
///
/// Errors: `Precondition` when the person has no government id on file,
/// `Validation` when the payload is incomplete, `NotFound` when the
/// referenced zone does not exist.
pub fn plan_provision<S: WorkflowStore + ?Sized>(
    store: &S,
    role: Role,
    person: &PersonProfile,
    additional_data: &Value,
) -> Result<Option<ProfileRecord>, WorkflowError> {
    let Some(kind) = ProfileKind::of_role(role) else {
        return Ok(None);
    };

    let Some(government_id) = person.government_id.clone() else {
        return Err(WorkflowError::Precondition {
            missing: vec!["government_id".to_string()],
        });
    };

    if store.profile_exists(kind, &government_id)? {
        tracing::info!(
            kind = %kind,
            government_id = %government_id,
            "profile already provisioned, skipping"
        );
        return Ok(None);
    }

    let full_name = person.full_name.clone().unwrap_or_default();

    let record = match kind {
        ProfileKind::Partner => ProfileRecord::Partner(PartnerProfile {
            government_id,
            full_name,
            phone: person.phone.clone().unwrap_or_default(),
            address: person.address.clone().unwrap_or_default(),
            created_at: Timestamp::now(),
        }),

        ProfileKind::Distributor => {
            let payload = DistributorPayload::from_value(additional_data)?;
            require_zone(store, &payload.zone_id)?;
            let products = store.existing_products(&payload.products_ids)?;
            if products.len() < payload.products_ids.len() {
                tracing::debug!(
                    requested = payload.products_ids.len(),
                    resolved = products.len(),
                    "dropping product ids that do not resolve to existing products"
                );
            }
            ProfileRecord::Distributor(DistributorProfile {
                government_id,
                full_name,
                zone_id: payload.zone_id,
                address: payload.address,
                products,
                created_at: Timestamp::now(),
            })
        }

        ProfileKind::Authority => {
            let payload = AuthorityPayload::from_value(additional_data)?;
            require_zone(store, &payload.zone_id)?;
            ProfileRecord::Authority(AuthorityProfile {
                government_id,
                full_name,
                zone_id: payload.zone_id,
                rank: payload.rank,
                created_at: Timestamp::now(),
            })
        }
    };

    Ok(Some(record))
}

fn require_zone<S: WorkflowStore + ?Sized>(
    store: &S,
    zone_id: &rolegate_core::ZoneId,
) -> Result<(), WorkflowError> {
    if store.zone_exists(zone_id)? {
        Ok(())
    } else {
        Err(WorkflowError::NotFound(format!("{zone_id}")))
    }
}
