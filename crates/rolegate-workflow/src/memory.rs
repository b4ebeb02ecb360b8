//! # In-Memory Store
//!
//! Thread-safe, cloneable in-memory implementation of [`WorkflowStore`].
//! Suitable for tests, the CLI, and development; a relational
//! implementation would back the same trait with row operations.
//!
//! All operations are synchronous (the lock is `parking_lot`, not an async
//! lock) and the whole state sits behind a single `RwLock`, so
//! `commit_review` gets its read-validate-apply sequence under one write
//! lock — the serialization the PENDING compare-and-set requires.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

use rolegate_core::{
    GovernmentId, ProductId, ProfileKind, ProfileRecord, RequestId, Role, UserId, ZoneId,
};
use rolegate_state::RoleRequest;

use crate::error::WorkflowError;
use crate::store::{CommitReview, ReviewDecision, UserRecord, WorkflowStore};

#[derive(Debug, Default)]
struct MemoryState {
    users: HashMap<UserId, UserRecord>,
    requests: HashMap<RequestId, RoleRequest>,
    zones: HashSet<ZoneId>,
    products: HashSet<ProductId>,
    profiles: Vec<ProfileRecord>,
}

/// In-memory [`WorkflowStore`].
#[derive(Debug)]
pub struct MemoryStore {
    state: Arc<RwLock<MemoryState>>,
}

impl Clone for MemoryStore {
    fn clone(&self) -> Self {
        Self {
            state: Arc::clone(&self.state),
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self {
            state: Arc::new(RwLock::new(MemoryState::default())),
        }
    }

    // ── Seeding ─────────────────────────────────────────────────────

    /// Insert or replace a user record.
    pub fn insert_user(&self, user: UserRecord) {
        self.state.write().users.insert(user.id, user);
    }

    /// Register a zone.
    pub fn insert_zone(&self, zone: ZoneId) {
        self.state.write().zones.insert(zone);
    }

    /// Register a product.
    pub fn insert_product(&self, product: ProductId) {
        self.state.write().products.insert(product);
    }

    /// Insert a profile record directly (bypassing provisioning).
    pub fn insert_profile(&self, profile: ProfileRecord) {
        self.state.write().profiles.push(profile);
    }

    // ── Listings ────────────────────────────────────────────────────

    /// All user records.
    pub fn users(&self) -> Vec<UserRecord> {
        self.state.read().users.values().cloned().collect()
    }

    /// All role requests.
    pub fn requests(&self) -> Vec<RoleRequest> {
        self.state.read().requests.values().cloned().collect()
    }

    /// All provisioned profile records.
    pub fn profiles(&self) -> Vec<ProfileRecord> {
        self.state.read().profiles.clone()
    }

    // ── Snapshots ───────────────────────────────────────────────────

    /// Serializable snapshot of the whole store, sorted for stable
    /// output.
    pub fn snapshot(&self) -> MemorySnapshot {
        let state = self.state.read();
        let mut users: Vec<_> = state.users.values().cloned().collect();
        users.sort_by_key(|u| *u.id.as_uuid());
        let mut requests: Vec<_> = state.requests.values().cloned().collect();
        requests.sort_by_key(|r| *r.id.as_uuid());
        let mut zones: Vec<_> = state.zones.iter().copied().collect();
        zones.sort_by_key(|z| *z.as_uuid());
        let mut products: Vec<_> = state.products.iter().copied().collect();
        products.sort_by_key(|p| *p.as_uuid());
        MemorySnapshot {
            users,
            requests,
            zones,
            products,
            profiles: state.profiles.clone(),
        }
    }

    /// Rebuild a store from a snapshot.
    pub fn from_snapshot(snapshot: MemorySnapshot) -> Self {
        let state = MemoryState {
            users: snapshot.users.into_iter().map(|u| (u.id, u)).collect(),
            requests: snapshot.requests.into_iter().map(|r| (r.id, r)).collect(),
            zones: snapshot.zones.into_iter().collect(),
            products: snapshot.products.into_iter().collect(),
            profiles: snapshot.profiles,
        };
        Self {
            state: Arc::new(RwLock::new(state)),
        }
    }
}

/// Serializable image of a [`MemoryStore`].
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct MemorySnapshot {
    pub users: Vec<UserRecord>,
    pub requests: Vec<RoleRequest>,
    pub zones: Vec<ZoneId>,
    pub products: Vec<ProductId>,
    pub profiles: Vec<ProfileRecord>,
}

impl WorkflowStore for MemoryStore {
    fn user(&self, id: &UserId) -> Result<Option<UserRecord>, WorkflowError> {
        Ok(self.state.read().users.get(id).cloned())
    }

    fn request(&self, id: &RequestId) -> Result<Option<RoleRequest>, WorkflowError> {
        Ok(self.state.read().requests.get(id).cloned())
    }

    fn insert_request(&self, request: RoleRequest) -> Result<(), WorkflowError> {
        self.state.write().requests.insert(request.id, request);
        Ok(())
    }

    fn has_pending_request(&self, user: &UserId, role: Role) -> Result<bool, WorkflowError> {
        Ok(self.state.read().requests.values().any(|r| {
            r.user_id == *user && r.requested_role == role && r.is_pending()
        }))
    }

    fn zone_exists(&self, zone: &ZoneId) -> Result<bool, WorkflowError> {
        Ok(self.state.read().zones.contains(zone))
    }

    fn existing_products(&self, ids: &[ProductId]) -> Result<Vec<ProductId>, WorkflowError> {
        let state = self.state.read();
        Ok(ids
            .iter()
            .copied()
            .filter(|id| state.products.contains(id))
            .collect())
    }

    fn profile_exists(
        &self,
        kind: ProfileKind,
        government_id: &GovernmentId,
    ) -> Result<bool, WorkflowError> {
        Ok(self
            .state
            .read()
            .profiles
            .iter()
            .any(|p| p.kind() == kind && p.government_id() == government_id))
    }

    /// Read-validate-apply under a single write lock. The status check and
    /// the transition cannot interleave with another reviewer, and every
    /// fallible step runs before the first mutation.
    fn commit_review(&self, commit: CommitReview) -> Result<RoleRequest, WorkflowError> {
        // A rejection carries no grant; refusing malformed commits here
        // keeps a caller bug from ever granting roles on the reject path.
        if commit.decision == ReviewDecision::Reject
            && (commit.new_roles.is_some() || commit.new_profile.is_some())
        {
            return Err(WorkflowError::Store(
                "rejection must not carry role or profile changes".to_string(),
            ));
        }

        let mut state = self.state.write();

        let request = state
            .requests
            .get(&commit.request_id)
            .ok_or_else(|| WorkflowError::NotFound(format!("{}", commit.request_id)))?;
        if !request.is_pending() {
            return Err(WorkflowError::InvalidState(format!(
                "request is {}, decisions are final",
                request.status
            )));
        }

        let mut decided = request.clone();
        match commit.decision {
            ReviewDecision::Approve => decided.approve(commit.evidence)?,
            ReviewDecision::Reject => decided.reject(commit.evidence)?,
        }

        // Role mutation is the one remaining fallible step; it runs before
        // any insert so a failure applies nothing.
        if let Some(roles) = commit.new_roles {
            let user = state
                .users
                .get_mut(&decided.user_id)
                .ok_or_else(|| WorkflowError::NotFound(format!("{}", decided.user_id)))?;
            user.roles = roles;
        }
        if let Some(profile) = commit.new_profile {
            state.profiles.push(profile);
        }
        state.requests.insert(commit.request_id, decided.clone());

        Ok(decided)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rolegate_core::{PersonProfile, RoleSet};
    use rolegate_state::{RequestStatus, ReviewEvidence};
    use serde_json::Value;

    fn seeded_user(store: &MemoryStore, roles: RoleSet) -> UserId {
        let id = UserId::new();
        store.insert_user(UserRecord {
            id,
            username: "tester".to_string(),
            roles,
            person: Some(PersonProfile {
                government_id: Some(GovernmentId::new("11222333A")),
                full_name: Some("Test User".to_string()),
                phone: Some("+34 600 111 222".to_string()),
                address: Some("Calle Uno 1".to_string()),
            }),
        });
        id
    }

    fn pending_request(store: &MemoryStore, user: UserId, role: Role) -> RequestId {
        let request = RoleRequest::new(user, role, None, "because", Value::Null);
        let id = request.id;
        store.insert_request(request).unwrap();
        id
    }

    fn evidence() -> ReviewEvidence {
        ReviewEvidence {
            reviewer: UserId::new(),
            comments: None,
        }
    }

    #[test]
    fn test_pending_probe_sees_only_pending() {
        let store = MemoryStore::new();
        let user = seeded_user(&store, RoleSet::single(Role::Client));
        let request_id = pending_request(&store, user, Role::Partner);
        assert!(store.has_pending_request(&user, Role::Partner).unwrap());
        assert!(!store.has_pending_request(&user, Role::Admin).unwrap());

        store
            .commit_review(CommitReview {
                request_id,
                decision: ReviewDecision::Reject,
                evidence: evidence(),
                new_roles: None,
                new_profile: None,
            })
            .unwrap();
        assert!(!store.has_pending_request(&user, Role::Partner).unwrap());
    }

    #[test]
    fn test_commit_approve_applies_all_effects() {
        let store = MemoryStore::new();
        let user = seeded_user(&store, RoleSet::single(Role::Client));
        let request_id = pending_request(&store, user, Role::Partner);

        let decided = store
            .commit_review(CommitReview {
                request_id,
                decision: ReviewDecision::Approve,
                evidence: evidence(),
                new_roles: Some(
                    [Role::Client, Role::Partner].into_iter().collect(),
                ),
                new_profile: None,
            })
            .unwrap();

        assert_eq!(decided.status, RequestStatus::Approved);
        let stored = store.user(&user).unwrap().unwrap();
        assert!(stored.roles.contains(Role::Partner));
    }

    #[test]
    fn test_second_commit_fails_with_invalid_state() {
        let store = MemoryStore::new();
        let user = seeded_user(&store, RoleSet::single(Role::Client));
        let request_id = pending_request(&store, user, Role::Partner);

        let commit = || CommitReview {
            request_id,
            decision: ReviewDecision::Reject,
            evidence: evidence(),
            new_roles: None,
            new_profile: None,
        };
        store.commit_review(commit()).unwrap();
        let err = store.commit_review(commit()).unwrap_err();
        assert!(matches!(err, WorkflowError::InvalidState(_)));
    }

    #[test]
    fn test_reject_commit_refuses_role_or_profile_changes() {
        let store = MemoryStore::new();
        let user = seeded_user(&store, RoleSet::single(Role::Client));
        let request_id = pending_request(&store, user, Role::Partner);

        let err = store
            .commit_review(CommitReview {
                request_id,
                decision: ReviewDecision::Reject,
                evidence: evidence(),
                new_roles: Some(RoleSet::single(Role::Partner)),
                new_profile: None,
            })
            .unwrap_err();
        assert!(matches!(err, WorkflowError::Store(_)));

        // Nothing applied: the request is still open and the roles stand.
        let request = store.request(&request_id).unwrap().unwrap();
        assert_eq!(request.status, RequestStatus::Pending);
        assert_eq!(
            store.user(&user).unwrap().unwrap().roles,
            RoleSet::single(Role::Client)
        );
    }

    #[test]
    fn test_failed_commit_applies_nothing() {
        let store = MemoryStore::new();
        let user = seeded_user(&store, RoleSet::single(Role::Client));
        let request_id = pending_request(&store, user, Role::Partner);

        // Remove the user out from under the commit; the role mutation
        // fails, so the request must stay PENDING and no profile appears.
        store.state.write().users.clear();
        let err = store
            .commit_review(CommitReview {
                request_id,
                decision: ReviewDecision::Approve,
                evidence: evidence(),
                new_roles: Some(RoleSet::single(Role::Partner)),
                new_profile: Some(ProfileRecord::Partner(rolegate_core::PartnerProfile {
                    government_id: GovernmentId::new("11222333A"),
                    full_name: "Test User".to_string(),
                    phone: "+34 600 111 222".to_string(),
                    address: "Calle Uno 1".to_string(),
                    created_at: rolegate_core::Timestamp::now(),
                })),
            })
            .unwrap_err();
        assert!(matches!(err, WorkflowError::NotFound(_)));

        let request = store.request(&request_id).unwrap().unwrap();
        assert_eq!(request.status, RequestStatus::Pending);
        assert!(store.profiles().is_empty());
    }

    #[test]
    fn test_existing_products_preserves_order_and_filters() {
        let store = MemoryStore::new();
        let a = ProductId::new();
        let b = ProductId::new();
        let ghost = ProductId::new();
        store.insert_product(a);
        store.insert_product(b);
        assert_eq!(
            store.existing_products(&[b, ghost, a]).unwrap(),
            vec![b, a]
        );
    }

    #[test]
    fn test_snapshot_roundtrip() {
        let store = MemoryStore::new();
        let user = seeded_user(&store, RoleSet::single(Role::Client));
        pending_request(&store, user, Role::Partner);
        store.insert_zone(ZoneId::new());

        let json = serde_json::to_string(&store.snapshot()).unwrap();
        let snapshot: MemorySnapshot = serde_json::from_str(&json).unwrap();
        let restored = MemoryStore::from_snapshot(snapshot);

        assert_eq!(restored.users().len(), 1);
        assert_eq!(restored.requests().len(), 1);
        assert!(restored.user(&user).unwrap().is_some());
    }
}
