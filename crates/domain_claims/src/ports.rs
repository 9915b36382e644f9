//! Claims Domain Ports
//!
//! Storage and lecturer lookup are external collaborators. The service only
//! sees these traits, so a database adapter can replace the in-memory one
//! without touching the pipeline.
//!
//! ```rust,ignore
//! let repository: Arc<dyn ClaimRepository> = Arc::new(InMemoryClaimRepository::new());
//! let updated = repository
//!     .modify(id, Box::new(move |claim: &mut Claim| claim.manager_approve(now)))
//!     .await?;
//! ```

use async_trait::async_trait;

use core_kernel::{ClaimId, DomainPort, PortError};

use crate::claim::Claim;
use crate::error::ClaimError;
use crate::lecturer::Lecturer;

/// A change applied to one stored claim
pub type ClaimMutation = Box<dyn FnOnce(&mut Claim) -> Result<(), ClaimError> + Send>;

#[async_trait]
pub trait ClaimRepository: DomainPort {
    /// Stores a new claim; an existing id is a `PortError::Conflict`
    async fn insert(&self, claim: Claim) -> Result<(), PortError>;

    async fn find_by_id(&self, id: ClaimId) -> Result<Option<Claim>, PortError>;

    /// All claims in insertion order
    async fn list(&self) -> Result<Vec<Claim>, PortError>;

    /// Atomic read-modify-write of one claim
    ///
    /// Returns `Ok(None)` when the id is unknown. When the mutation fails the
    /// stored claim is left untouched and the error is returned.
    async fn modify(
        &self,
        id: ClaimId,
        mutation: ClaimMutation,
    ) -> Result<Option<Claim>, ClaimError>;
}

/// Read-only view of the lecturer directory
#[async_trait]
pub trait LecturerDirectory: DomainPort {
    /// First active lecturer whose full name matches, ignoring case
    async fn find_active_by_name(&self, name: &str) -> Result<Option<Lecturer>, PortError>;

    /// Number of lecturers currently marked active
    async fn count_active(&self) -> Result<usize, PortError>;
}

/// In-memory adapters
///
/// Used by tests and the batch runner.
pub mod memory {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Arc;
    use tokio::sync::RwLock;
    use tracing::debug;

    #[derive(Debug, Default)]
    struct ClaimStore {
        claims: HashMap<ClaimId, Claim>,
        order: Vec<ClaimId>,
    }

    #[derive(Debug, Default, Clone)]
    pub struct InMemoryClaimRepository {
        store: Arc<RwLock<ClaimStore>>,
    }

    impl InMemoryClaimRepository {
        pub fn new() -> Self {
            Self::default()
        }

        /// Pre-populates with claims for testing
        pub async fn with_claims(claims: Vec<Claim>) -> Result<Self, PortError> {
            let repository = Self::new();
            for claim in claims {
                repository.insert(claim).await?;
            }
            Ok(repository)
        }

        pub async fn len(&self) -> usize {
            self.store.read().await.order.len()
        }

        pub async fn is_empty(&self) -> bool {
            self.len().await == 0
        }
    }

    impl DomainPort for InMemoryClaimRepository {}

    #[async_trait]
    impl ClaimRepository for InMemoryClaimRepository {
        async fn insert(&self, claim: Claim) -> Result<(), PortError> {
            let mut store = self.store.write().await;
            if store.claims.contains_key(&claim.id) {
                return Err(PortError::conflict(format!("claim {} already exists", claim.id)));
            }
            debug!(claim_id = %claim.id, "storing claim");
            store.order.push(claim.id);
            store.claims.insert(claim.id, claim);
            Ok(())
        }

        async fn find_by_id(&self, id: ClaimId) -> Result<Option<Claim>, PortError> {
            Ok(self.store.read().await.claims.get(&id).cloned())
        }

        async fn list(&self) -> Result<Vec<Claim>, PortError> {
            let store = self.store.read().await;
            Ok(store
                .order
                .iter()
                .filter_map(|id| store.claims.get(id).cloned())
                .collect())
        }

        async fn modify(
            &self,
            id: ClaimId,
            mutation: ClaimMutation,
        ) -> Result<Option<Claim>, ClaimError> {
            let mut store = self.store.write().await;
            let Some(current) = store.claims.get(&id) else {
                return Ok(None);
            };

            let mut updated = current.clone();
            mutation(&mut updated)?;
            store.claims.insert(id, updated.clone());
            Ok(Some(updated))
        }
    }

    #[derive(Debug, Default, Clone)]
    pub struct InMemoryLecturerDirectory {
        lecturers: Arc<RwLock<Vec<Lecturer>>>,
    }

    impl InMemoryLecturerDirectory {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn with_lecturers(lecturers: Vec<Lecturer>) -> Self {
            Self {
                lecturers: Arc::new(RwLock::new(lecturers)),
            }
        }
    }

    impl DomainPort for InMemoryLecturerDirectory {}

    #[async_trait]
    impl LecturerDirectory for InMemoryLecturerDirectory {
        async fn find_active_by_name(&self, name: &str) -> Result<Option<Lecturer>, PortError> {
            Ok(self
                .lecturers
                .read()
                .await
                .iter()
                .find(|l| l.is_active && l.answers_to(name))
                .cloned())
        }

        async fn count_active(&self) -> Result<usize, PortError> {
            Ok(self.lecturers.read().await.iter().filter(|l| l.is_active).count())
        }
    }
}
