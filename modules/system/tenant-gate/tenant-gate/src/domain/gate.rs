//! Admission rules. Pure functions: no I/O, no panics, one decision each.

use tenant_gate_sdk::{
    AccessDecision, InfraError, Principal, RoleBinding, RouteClass, SubscriptionStatus,
    TenantContext,
};
use uuid::Uuid;

/// Stage A: tenant and domain admission.
///
/// Returns the tenant id later stages must bind against (`None` on the
/// platform host), or the decision that ends the request.
///
/// # Errors
///
/// Returns the terminal [`AccessDecision`] when the request may not proceed.
pub fn admit_tenant(
    resolution: &Result<TenantContext, InfraError>,
    route: &RouteClass,
) -> Result<Option<Uuid>, AccessDecision> {
    let ctx = resolution
        .as_ref()
        .map_err(|_| AccessDecision::ServiceUnavailable)?;

    if ctx.is_platform() {
        return Ok(None);
    }

    // Missing, inactive and unverified tenants look the same from outside.
    let tenant_id = match ctx.tenant_id {
        Some(id) if ctx.is_active && ctx.is_domain_verified => id,
        _ => return Err(AccessDecision::NotFound),
    };

    if ctx.subscription_status != SubscriptionStatus::Active
        && !route.is_public()
        && !route.billing_recovery
    {
        return Err(if route.is_api() {
            AccessDecision::PaymentRequired
        } else {
            AccessDecision::RedirectBilling
        });
    }

    Ok(Some(tenant_id))
}

/// Stage B: principal and role admission. Only meaningful after
/// [`admit_tenant`] passed; `tenant_id` is its result.
#[must_use]
pub fn admit_principal(
    principal: Option<&Principal>,
    tenant_id: Option<Uuid>,
    route: &RouteClass,
) -> AccessDecision {
    if route.is_public() {
        return AccessDecision::Allow;
    }

    let Some(principal) = principal else {
        return if route.is_api() {
            AccessDecision::Unauthorized
        } else {
            AccessDecision::RedirectLogin
        };
    };

    if !binding_holds(principal, tenant_id) {
        return AccessDecision::Forbidden;
    }

    if let Some(roles) = &route.required_roles
        && !roles.contains(&principal.role)
    {
        return AccessDecision::Forbidden;
    }

    AccessDecision::Allow
}

fn binding_holds(principal: &Principal, tenant_id: Option<Uuid>) -> bool {
    match principal.role.binding() {
        RoleBinding::Unrestricted => true,
        // District admins may use the shared domain without a district (the
        // district picker lives there). Flagged in DESIGN.md.
        RoleBinding::District => match tenant_id {
            None => true,
            Some(tenant) => principal.district_id == Some(tenant),
        },
        RoleBinding::Restaurant => {
            principal.restaurant_id.is_some()
                && tenant_id.is_none_or(|tenant| principal.district_id == Some(tenant))
        }
    }
}

/// Both stages over already-resolved inputs.
#[must_use]
pub fn decide(
    resolution: &Result<TenantContext, InfraError>,
    principal: Option<&Principal>,
    route: &RouteClass,
) -> AccessDecision {
    match admit_tenant(resolution, route) {
        Ok(tenant_id) => admit_principal(principal, tenant_id, route),
        Err(decision) => decision,
    }
}
