#![allow(dead_code)]

use std::time::Duration;

use sea_orm::{ActiveModelTrait, ConnectOptions, Database, DatabaseConnection, Set};
use secrecy::SecretString;
use tenant_gate::TenantGateModule;
use tenant_gate::config::{SessionConfig, TenantGateConfig};
use tenant_gate::domain::session::SessionClaims;
use tenant_gate::infra::storage::entity::{district, restaurant};
use tenant_gate_sdk::{Role, SubscriptionStatus};
use time::OffsetDateTime;
use uuid::Uuid;

pub const PLATFORM: &str = "tablewise.app";
pub const SECRET: &str = "integration-secret";

pub async fn inmem_db() -> DatabaseConnection {
    let mut opts = ConnectOptions::new("sqlite::memory:");
    opts.max_connections(1).min_connections(1).sqlx_logging(false);
    let db = Database::connect(opts)
        .await
        .expect("Failed to connect to in-memory database");
    TenantGateModule::migrate(&db)
        .await
        .expect("Failed to run migrations");
    db
}

pub fn config(cache_ttl_secs: u64) -> TenantGateConfig {
    TenantGateConfig {
        platform_domain: PLATFORM.to_owned(),
        tenant_cache_ttl_secs: cache_ttl_secs,
        session: SessionConfig {
            secret: SecretString::from(SECRET.to_owned()),
            ..SessionConfig::default()
        },
        ..TenantGateConfig::default()
    }
}

pub struct DistrictSeed<'a> {
    pub domain: Option<&'a str>,
    pub verified: bool,
    pub active: bool,
    pub status: SubscriptionStatus,
    pub admin: Option<Uuid>,
}

impl Default for DistrictSeed<'_> {
    fn default() -> Self {
        Self {
            domain: None,
            verified: true,
            active: true,
            status: SubscriptionStatus::Active,
            admin: None,
        }
    }
}

pub async fn seed_district(db: &DatabaseConnection, seed: DistrictSeed<'_>) -> Uuid {
    let id = Uuid::new_v4();
    district::ActiveModel {
        id: Set(id),
        name: Set(format!("district-{id}")),
        custom_domain: Set(seed.domain.map(str::to_owned)),
        is_active: Set(seed.active),
        domain_verified: Set(seed.verified),
        subscription_status: Set(seed.status.as_str().to_owned()),
        admin_user_id: Set(seed.admin),
        created_at: Set(OffsetDateTime::now_utc()),
    }
    .insert(db)
    .await
    .expect("insert district");
    id
}

pub async fn seed_restaurant(
    db: &DatabaseConnection,
    district_id: Uuid,
    owner: Option<Uuid>,
) -> Uuid {
    let id = Uuid::new_v4();
    restaurant::ActiveModel {
        id: Set(id),
        district_id: Set(district_id),
        owner_user_id: Set(owner),
        name: Set(format!("restaurant-{id}")),
        created_at: Set(OffsetDateTime::now_utc()),
    }
    .insert(db)
    .await
    .expect("insert restaurant");
    id
}

pub fn token(module: &TenantGateModule, user: Uuid, role: Role) -> String {
    module
        .sessions()
        .issue(&SessionClaims::new(user, role, Duration::from_secs(600)))
        .expect("issue token")
}
