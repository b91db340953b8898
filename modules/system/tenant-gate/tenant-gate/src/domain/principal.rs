//! Session token to principal, with bindings materialized from ownership
//! records.

use std::sync::Arc;

use tenant_gate_sdk::{Principal, Role, RoleBinding};
use uuid::Uuid;

use super::error::DomainError;
use super::repo::OwnershipRepository;
use super::session::{SessionClaims, SessionCodec};

pub struct PrincipalResolverService {
    codec: SessionCodec,
    ownership: Arc<dyn OwnershipRepository>,
}

impl PrincipalResolverService {
    #[must_use]
    pub fn new(codec: SessionCodec, ownership: Arc<dyn OwnershipRepository>) -> Self {
        Self { codec, ownership }
    }

    /// Mint a token for the login flow.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::TokenSigning`] if the token cannot be signed.
    pub fn issue(&self, claims: &SessionClaims) -> Result<String, DomainError> {
        self.codec.issue(claims)
    }

    /// Resolve a session token. Anything that does not verify, or names an
    /// unknown role, yields `None`.
    #[tracing::instrument(skip_all)]
    pub async fn resolve(&self, token: &str) -> Option<Principal> {
        let claims = match self.codec.verify(token) {
            Ok(claims) => claims,
            Err(e) => {
                tracing::debug!(error = %e, "Session token rejected");
                return None;
            }
        };

        let role = match claims.role.parse::<Role>() {
            Ok(role) => role,
            Err(e) => {
                tracing::debug!(error = %e, "Session token carries an unknown role");
                return None;
            }
        };

        let (restaurant_id, district_id) = match role.binding() {
            RoleBinding::Unrestricted => (None, None),
            RoleBinding::District => (None, self.district_binding(&claims).await),
            RoleBinding::Restaurant => match self.restaurant_binding(role, &claims).await {
                Some((restaurant, district)) => (Some(restaurant), Some(district)),
                None => (None, None),
            },
        };

        Some(Principal {
            user_id: claims.sub,
            role,
            restaurant_id,
            district_id,
        })
    }

    async fn district_binding(&self, claims: &SessionClaims) -> Option<Uuid> {
        if claims.did.is_some() {
            return claims.did;
        }
        lookup(
            "district_administered_by",
            self.ownership.district_administered_by(claims.sub).await,
        )
    }

    /// The restaurant and the district that owns it, or nothing.
    async fn restaurant_binding(&self, role: Role, claims: &SessionClaims) -> Option<(Uuid, Uuid)> {
        let restaurant = match claims.rid {
            Some(rid) => rid,
            None if role == Role::RestaurantOwner => lookup(
                "restaurant_owned_by",
                self.ownership.restaurant_owned_by(claims.sub).await,
            )?,
            None => return None,
        };

        let district = lookup(
            "district_of_restaurant",
            self.ownership.district_of_restaurant(restaurant).await,
        )?;
        Some((restaurant, district))
    }
}

fn lookup(op: &str, res: Result<Option<Uuid>, DomainError>) -> Option<Uuid> {
    res.unwrap_or_else(|e| {
        tracing::warn!(operation = op, error = %e, "Ownership lookup failed; no binding");
        None
    })
}
