//! # Role-Specific Request Payloads
//!
//! A role request carries an optional `additional_data` JSON object with
//! role-specific fields. The raw JSON stays on the request record so it can
//! be re-validated at review time (the data may have gone stale between
//! submission and decision); this module is the one typed parse of it.
//!
//! Field names use the camelCase of the submission format (`zoneId`,
//! `productsIds`) — errors report them exactly as the caller wrote them.

use serde_json::Value;
use thiserror::Error;
use uuid::Uuid;

use crate::identity::{ProductId, ZoneId};

/// Payload rejection naming every missing or malformed field, in the
/// order the fields are defined.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("missing or invalid payload fields: {}", fields.join(", "))]
pub struct PayloadError {
    /// Dotted paths of the offending fields, e.g. `additionalData.zoneId`.
    pub fields: Vec<String>,
}

/// Parsed payload for a DISTRIBUTOR request: an assigned zone, a business
/// address, and optionally the products the distributor will carry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DistributorPayload {
    pub zone_id: ZoneId,
    pub address: String,
    /// Requested product attachments. Entries that were not well-formed
    /// ids have already been dropped here; entries that do not resolve to
    /// existing products are dropped later, at provisioning time.
    pub products_ids: Vec<ProductId>,
}

impl DistributorPayload {
    /// Parse from the request's raw `additional_data`.
    ///
    /// Requires `zoneId` and `address`; `productsIds` is optional and
    /// lenient (malformed entries are dropped with a debug log, not
    /// rejected).
    pub fn from_value(data: &Value) -> Result<Self, PayloadError> {
        let mut fields = Vec::new();

        let zone_id = parse_zone_id(data);
        if zone_id.is_none() {
            fields.push("additionalData.zoneId".to_string());
        }

        let address = parse_string(data, "address");
        if address.is_none() {
            fields.push("additionalData.address".to_string());
        }

        match (zone_id, address) {
            (Some(zone_id), Some(address)) => Ok(Self {
                zone_id,
                address,
                products_ids: parse_products_ids(data),
            }),
            _ => Err(PayloadError { fields }),
        }
    }
}

/// Parsed payload for an AUTHORITY request: the zone of jurisdiction and
/// the authority's rank.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthorityPayload {
    pub zone_id: ZoneId,
    /// Rank, used downstream to compute the commission percentage.
    pub rank: i64,
}

impl AuthorityPayload {
    /// Parse from the request's raw `additional_data`.
    ///
    /// Requires `zoneId` and an integer-coercible `rank` (a JSON number or
    /// a numeric string).
    pub fn from_value(data: &Value) -> Result<Self, PayloadError> {
        let mut fields = Vec::new();

        let rank = parse_rank(data);
        if rank.is_none() {
            fields.push("additionalData.rank".to_string());
        }

        let zone_id = parse_zone_id(data);
        if zone_id.is_none() {
            fields.push("additionalData.zoneId".to_string());
        }

        match (zone_id, rank) {
            (Some(zone_id), Some(rank)) => Ok(Self { zone_id, rank }),
            _ => Err(PayloadError { fields }),
        }
    }
}

fn parse_string(data: &Value, key: &str) -> Option<String> {
    data.get(key)
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

fn parse_zone_id(data: &Value) -> Option<ZoneId> {
    let raw = data.get("zoneId")?.as_str()?;
    Uuid::parse_str(raw.trim()).ok().map(ZoneId)
}

/// Coerce `rank` to an integer: JSON integers pass through, numeric
/// strings are parsed, everything else is rejected.
fn parse_rank(data: &Value) -> Option<i64> {
    match data.get("rank")? {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn parse_products_ids(data: &Value) -> Vec<ProductId> {
    let Some(entries) = data.get("productsIds").and_then(Value::as_array) else {
        return Vec::new();
    };
    entries
        .iter()
        .filter_map(|entry| {
            let parsed = entry.as_str().and_then(|s| Uuid::parse_str(s.trim()).ok());
            if parsed.is_none() {
                tracing::debug!(entry = %entry, "dropping malformed product id in productsIds");
            }
            parsed.map(ProductId)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_distributor_payload_complete() {
        let zone = Uuid::new_v4();
        let data = json!({ "zoneId": zone.to_string(), "address": "Calle Sur 4" });
        let payload = DistributorPayload::from_value(&data).unwrap();
        assert_eq!(payload.zone_id, ZoneId(zone));
        assert_eq!(payload.address, "Calle Sur 4");
        assert!(payload.products_ids.is_empty());
    }

    #[test]
    fn test_distributor_missing_address_named() {
        let data = json!({ "zoneId": Uuid::new_v4().to_string() });
        let err = DistributorPayload::from_value(&data).unwrap_err();
        assert_eq!(err.fields, vec!["additionalData.address"]);
    }

    #[test]
    fn test_distributor_missing_everything_names_all() {
        let err = DistributorPayload::from_value(&Value::Null).unwrap_err();
        assert_eq!(
            err.fields,
            vec!["additionalData.zoneId", "additionalData.address"]
        );
    }

    #[test]
    fn test_distributor_malformed_zone_id_rejected() {
        let data = json!({ "zoneId": "zone-7", "address": "Calle Sur 4" });
        let err = DistributorPayload::from_value(&data).unwrap_err();
        assert_eq!(err.fields, vec!["additionalData.zoneId"]);
    }

    #[test]
    fn test_distributor_malformed_product_entries_dropped() {
        let good = Uuid::new_v4();
        let data = json!({
            "zoneId": Uuid::new_v4().to_string(),
            "address": "Calle Sur 4",
            "productsIds": [good.to_string(), "not-a-uuid", 42],
        });
        let payload = DistributorPayload::from_value(&data).unwrap();
        assert_eq!(payload.products_ids, vec![ProductId(good)]);
    }

    #[test]
    fn test_authority_payload_complete() {
        let zone = Uuid::new_v4();
        let data = json!({ "rank": 2, "zoneId": zone.to_string() });
        let payload = AuthorityPayload::from_value(&data).unwrap();
        assert_eq!(payload.rank, 2);
        assert_eq!(payload.zone_id, ZoneId(zone));
    }

    #[test]
    fn test_authority_rank_coerced_from_string() {
        let data = json!({ "rank": "3", "zoneId": Uuid::new_v4().to_string() });
        assert_eq!(AuthorityPayload::from_value(&data).unwrap().rank, 3);
    }

    #[test]
    fn test_authority_non_numeric_rank_rejected() {
        let data = json!({ "rank": "captain", "zoneId": Uuid::new_v4().to_string() });
        let err = AuthorityPayload::from_value(&data).unwrap_err();
        assert_eq!(err.fields, vec!["additionalData.rank"]);
    }

    #[test]
    fn test_authority_missing_both_names_both() {
        let err = AuthorityPayload::from_value(&json!({})).unwrap_err();
        assert_eq!(
            err.fields,
            vec!["additionalData.rank", "additionalData.zoneId"]
        );
    }

    #[test]
    fn test_blank_address_counts_as_missing() {
        let data = json!({ "zoneId": Uuid::new_v4().to_string(), "address": "  " });
        let err = DistributorPayload::from_value(&data).unwrap_err();
        assert_eq!(err.fields, vec!["additionalData.address"]);
    }
}
