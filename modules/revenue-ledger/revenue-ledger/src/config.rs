//! Configuration for the revenue ledger.

use std::time::Duration;

use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RevenueLedgerConfig {
    /// Maximum records returned by a tenant listing.
    pub list_limit: u64,

    /// Deadline for one audit write, in milliseconds. A slower sink is
    /// abandoned and the ledger replies anyway.
    pub audit_timeout_ms: u64,

    pub signals: SignalsConfig,
}

impl RevenueLedgerConfig {
    #[must_use]
    pub fn audit_timeout(&self) -> Duration {
        Duration::from_millis(self.audit_timeout_ms)
    }
}

impl Default for RevenueLedgerConfig {
    fn default() -> Self {
        Self {
            list_limit: 500,
            audit_timeout_ms: 2_000,
            signals: SignalsConfig::default(),
        }
    }
}

/// Churn/upsell thresholds. Percentages are whole numbers.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SignalsConfig {
    /// Length of the current and of the comparison window, in days.
    pub window_days: u32,
    pub order_drop_pct: u32,
    pub revenue_drop_pct: u32,
    pub inactivity_days: u32,
    pub growth_pct: u32,
}

impl Default for SignalsConfig {
    fn default() -> Self {
        Self {
            window_days: 30,
            order_drop_pct: 30,
            revenue_drop_pct: 30,
            inactivity_days: 14,
            growth_pct: 25,
        }
    }
}
