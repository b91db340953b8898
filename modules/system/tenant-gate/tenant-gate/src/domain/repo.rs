use async_trait::async_trait;
use tenant_gate_sdk::SubscriptionStatus;
use uuid::Uuid;

use super::error::DomainError;

/// The district columns the gate reads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DistrictRecord {
    pub id: Uuid,
    pub is_active: bool,
    pub domain_verified: bool,
    pub subscription_status: SubscriptionStatus,
}

/// Read-only access to districts by custom domain.
#[async_trait]
pub trait DistrictRepository: Send + Sync {
    /// `domain` is already normalized; the stored value is too.
    async fn find_by_custom_domain(
        &self,
        domain: &str,
    ) -> Result<Option<DistrictRecord>, DomainError>;
}

/// Ownership lookups used to materialize principal bindings.
///
/// Each returns `None` when the user owns nothing or owns more than one
/// candidate; an ambiguous binding is no binding.
#[async_trait]
pub trait OwnershipRepository: Send + Sync {
    async fn district_administered_by(&self, user_id: Uuid) -> Result<Option<Uuid>, DomainError>;

    async fn restaurant_owned_by(&self, user_id: Uuid) -> Result<Option<Uuid>, DomainError>;

    async fn district_of_restaurant(
        &self,
        restaurant_id: Uuid,
    ) -> Result<Option<Uuid>, DomainError>;
}
