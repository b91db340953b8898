use async_trait::async_trait;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QuerySelect};
use tenant_gate_sdk::SubscriptionStatus;
use uuid::Uuid;

use crate::domain::error::DomainError;
use crate::domain::repo::{DistrictRecord, DistrictRepository, OwnershipRepository};

use super::entity::{district, restaurant};

/// District and restaurant reads over SeaORM.
#[derive(Clone)]
pub struct SeaOrmDirectoryRepository {
    db: DatabaseConnection,
}

impl SeaOrmDirectoryRepository {
    #[must_use]
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn parse_status(district_id: Uuid, raw: &str) -> SubscriptionStatus {
    raw.parse().unwrap_or_else(|e: String| {
        tracing::warn!(
            %district_id,
            error = %e,
            "Unknown subscription status; treating as inactive"
        );
        SubscriptionStatus::Inactive
    })
}

/// Exactly one id, or nothing.
fn single(ids: Vec<Uuid>) -> Option<Uuid> {
    match ids.as_slice() {
        [only] => Some(*only),
        [] => None,
        _ => {
            tracing::warn!(candidates = ids.len(), "Ambiguous ownership; no binding");
            None
        }
    }
}

#[async_trait]
impl DistrictRepository for SeaOrmDirectoryRepository {
    async fn find_by_custom_domain(
        &self,
        domain: &str,
    ) -> Result<Option<DistrictRecord>, DomainError> {
        let found = district::Entity::find()
            .filter(district::Column::CustomDomain.eq(domain))
            .one(&self.db)
            .await?;

        Ok(found.map(|m| DistrictRecord {
            id: m.id,
            is_active: m.is_active,
            domain_verified: m.domain_verified,
            subscription_status: parse_status(m.id, &m.subscription_status),
        }))
    }
}

#[async_trait]
impl OwnershipRepository for SeaOrmDirectoryRepository {
    async fn district_administered_by(&self, user_id: Uuid) -> Result<Option<Uuid>, DomainError> {
        let ids = district::Entity::find()
            .select_only()
            .column(district::Column::Id)
            .filter(district::Column::AdminUserId.eq(user_id))
            .limit(2)
            .into_tuple::<Uuid>()
            .all(&self.db)
            .await?;
        Ok(single(ids))
    }

    async fn restaurant_owned_by(&self, user_id: Uuid) -> Result<Option<Uuid>, DomainError> {
        let ids = restaurant::Entity::find()
            .select_only()
            .column(restaurant::Column::Id)
            .filter(restaurant::Column::OwnerUserId.eq(user_id))
            .limit(2)
            .into_tuple::<Uuid>()
            .all(&self.db)
            .await?;
        Ok(single(ids))
    }

    async fn district_of_restaurant(
        &self,
        restaurant_id: Uuid,
    ) -> Result<Option<Uuid>, DomainError> {
        let found = restaurant::Entity::find_by_id(restaurant_id)
            .one(&self.db)
            .await?;
        Ok(found.map(|r| r.district_id))
    }
}
