//! Domain models for the tenant gate.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// How the request reached the platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HostKind {
    /// The shared platform domain (or a loopback/dev host).
    Platform,
    /// A tenant-registered custom domain.
    CustomDomain,
}

/// Billing state of a district subscription.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubscriptionStatus {
    #[default]
    Inactive,
    Active,
    PastDue,
    Suspended,
    Cancelled,
}

impl SubscriptionStatus {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Inactive => "inactive",
            Self::Active => "active",
            Self::PastDue => "past_due",
            Self::Suspended => "suspended",
            Self::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for SubscriptionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SubscriptionStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "inactive" => Ok(Self::Inactive),
            "active" => Ok(Self::Active),
            "past_due" => Ok(Self::PastDue),
            "suspended" => Ok(Self::Suspended),
            "cancelled" => Ok(Self::Cancelled),
            other => Err(format!("unknown subscription status '{other}'")),
        }
    }
}

/// Result of tenant resolution for a single request.
///
/// `host_kind = CustomDomain` with `tenant_id = None` means the lookup ran and
/// matched nothing (or matched an inactive tenant, which is reported the same
/// way). A found-but-unverified tenant keeps its `tenant_id` and carries
/// `is_domain_verified = false`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TenantContext {
    pub host_kind: HostKind,
    pub tenant_id: Option<Uuid>,
    pub is_active: bool,
    pub is_domain_verified: bool,
    pub subscription_status: SubscriptionStatus,
}

impl TenantContext {
    /// Context for the shared platform domain. No tenant is bound.
    #[must_use]
    pub fn platform() -> Self {
        Self {
            host_kind: HostKind::Platform,
            tenant_id: None,
            is_active: true,
            is_domain_verified: true,
            subscription_status: SubscriptionStatus::Active,
        }
    }

    /// Context for a custom domain that matched no active tenant.
    #[must_use]
    pub fn unmatched() -> Self {
        Self {
            host_kind: HostKind::CustomDomain,
            tenant_id: None,
            is_active: false,
            is_domain_verified: false,
            subscription_status: SubscriptionStatus::Inactive,
        }
    }

    #[must_use]
    pub fn is_platform(&self) -> bool {
        self.host_kind == HostKind::Platform
    }
}

/// Closed set of platform roles.
///
/// Hierarchy: `PlatformOwner` (unrestricted) > `DistrictAdmin` (one district) >
/// `RestaurantOwner` = `Partner` (one restaurant).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    PlatformOwner,
    DistrictAdmin,
    RestaurantOwner,
    Partner,
}

/// The binding a role must carry before it may touch protected resources.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoleBinding {
    /// Exempt from any tenant binding.
    Unrestricted,
    /// Bound to exactly one district.
    District,
    /// Bound to exactly one restaurant (and through it, one district).
    Restaurant,
}

impl Role {
    pub const ALL: [Self; 4] = [
        Self::PlatformOwner,
        Self::DistrictAdmin,
        Self::RestaurantOwner,
        Self::Partner,
    ];

    #[must_use]
    pub fn binding(self) -> RoleBinding {
        match self {
            Self::PlatformOwner => RoleBinding::Unrestricted,
            Self::DistrictAdmin => RoleBinding::District,
            Self::RestaurantOwner | Self::Partner => RoleBinding::Restaurant,
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::PlatformOwner => "platform_owner",
            Self::DistrictAdmin => "district_admin",
            Self::RestaurantOwner => "restaurant_owner",
            Self::Partner => "partner",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = String;

    /// Exact match only; loosely-typed role strings are rejected.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|role| role.as_str() == s)
            .ok_or_else(|| format!("unknown role '{s}'"))
    }
}

/// An authenticated subject with its materialized bindings.
///
/// For `RestaurantOwner`/`Partner`, `district_id` is the district that owns
/// `restaurant_id`. For `DistrictAdmin` it is the administered district.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Principal {
    pub user_id: Uuid,
    pub role: Role,
    pub restaurant_id: Option<Uuid>,
    pub district_id: Option<Uuid>,
}

/// The single outcome of admission control for one request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccessDecision {
    Allow,
    /// Browser surface: no session.
    RedirectLogin,
    /// API surface: no session (401).
    Unauthorized,
    Forbidden,
    NotFound,
    ServiceUnavailable,
    /// Browser surface: tenant subscription is not active.
    RedirectBilling,
    /// API surface: tenant subscription is not active (402).
    PaymentRequired,
}

impl AccessDecision {
    #[must_use]
    pub fn is_allow(self) -> bool {
        self == Self::Allow
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Allow => "allow",
            Self::RedirectLogin => "redirect_login",
            Self::Unauthorized => "unauthorized",
            Self::Forbidden => "forbidden",
            Self::NotFound => "not_found",
            Self::ServiceUnavailable => "service_unavailable",
            Self::RedirectBilling => "redirect_billing",
            Self::PaymentRequired => "payment_required",
        }
    }
}

impl fmt::Display for AccessDecision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Whether a route needs an authenticated principal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RouteAccess {
    Public,
    Protected,
}

/// Which response surface the route belongs to.
///
/// Browser routes get redirects; API routes get status codes. The two are
/// never mixed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RouteSurface {
    Browser,
    Api,
}

/// Classification of a request path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteClass {
    pub access: RouteAccess,
    pub surface: RouteSurface,
    /// The billing-recovery route stays reachable while a subscription is lapsed.
    pub billing_recovery: bool,
    /// Narrower-than-any-role allow-list, if the route carries one.
    pub required_roles: Option<Vec<Role>>,
}

impl RouteClass {
    #[must_use]
    pub fn is_public(&self) -> bool {
        self.access == RouteAccess::Public
    }

    #[must_use]
    pub fn is_api(&self) -> bool {
        self.surface == RouteSurface::Api
    }
}

/// The subset of an HTTP request the gate looks at.
#[derive(Debug, Clone, Default)]
pub struct InboundRequest {
    pub host: String,
    pub path: String,
    pub method: String,
    pub session_token: Option<String>,
}

/// Decision plus whatever was resolved on the way to it.
///
/// `tenant` and `principal` are only meaningful to business logic when the
/// decision is [`AccessDecision::Allow`].
#[derive(Debug, Clone)]
pub struct GateOutcome {
    pub decision: AccessDecision,
    pub route: RouteClass,
    pub tenant: Option<TenantContext>,
    pub principal: Option<Principal>,
}
