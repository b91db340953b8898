use revenue_ledger_sdk::PayoutStatus;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::repo::ResellerBinding;

/// Body of `POST /revenue-shares/{id}/payout`.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PayoutRequest {
    pub status: PayoutStatus,
}

/// Body of `PUT /tenants/{tenant_id}/reseller`.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BindResellerRequest {
    pub reseller_id: Uuid,
    pub commission_rate_bps: i32,
}

#[derive(Debug, Clone, Serialize)]
pub struct ResellerBindingDto {
    pub tenant_id: Uuid,
    pub reseller_id: Uuid,
    pub commission_rate_bps: i32,
    pub active: bool,
}

impl From<ResellerBinding> for ResellerBindingDto {
    fn from(b: ResellerBinding) -> Self {
        Self {
            tenant_id: b.tenant_id,
            reseller_id: b.reseller_id,
            commission_rate_bps: b.commission_rate_bps,
            active: b.active,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct HistoryQuery {
    #[serde(default)]
    pub limit: Option<u64>,
}
