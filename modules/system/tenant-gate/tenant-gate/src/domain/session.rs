//! HS256 session tokens.

use std::time::Duration;

use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use secrecy::ExposeSecret;
use serde::{Deserialize, Serialize};
use tenant_gate_sdk::Role;
use time::OffsetDateTime;
use uuid::Uuid;

use super::error::DomainError;
use crate::config::SessionConfig;

/// Claims carried by a session token.
///
/// `role` stays a string on the wire so that an unknown role is rejected by
/// the resolver rather than by the JSON decoder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionClaims {
    pub sub: Uuid,
    pub role: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rid: Option<Uuid>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub did: Option<Uuid>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iss: Option<String>,
    pub iat: i64,
    pub exp: i64,
}

impl SessionClaims {
    /// Claims for `user_id` valid for `ttl` from now.
    #[must_use]
    pub fn new(user_id: Uuid, role: Role, ttl: Duration) -> Self {
        let now = OffsetDateTime::now_utc().unix_timestamp();
        let ttl = i64::try_from(ttl.as_secs()).unwrap_or(i64::MAX);
        Self {
            sub: user_id,
            role: role.as_str().to_owned(),
            rid: None,
            did: None,
            iss: None,
            iat: now,
            exp: now.saturating_add(ttl),
        }
    }

    #[must_use]
    pub fn with_restaurant(mut self, restaurant_id: Uuid) -> Self {
        self.rid = Some(restaurant_id);
        self
    }

    #[must_use]
    pub fn with_district(mut self, district_id: Uuid) -> Self {
        self.did = Some(district_id);
        self
    }
}

/// Signs and verifies session tokens with the shared secret.
pub struct SessionCodec {
    encoding: Option<EncodingKey>,
    decoding: Option<DecodingKey>,
    issuer: Option<String>,
    validation: Validation,
}

impl SessionCodec {
    #[must_use]
    pub fn new(cfg: &SessionConfig) -> Self {
        let secret = cfg.secret.expose_secret().as_bytes();
        let (encoding, decoding) = if secret.is_empty() {
            tracing::warn!("Session secret is empty; every session token will be rejected");
            (None, None)
        } else {
            (
                Some(EncodingKey::from_secret(secret)),
                Some(DecodingKey::from_secret(secret)),
            )
        };

        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = cfg.leeway_secs;
        if let Some(iss) = &cfg.issuer {
            validation.set_required_spec_claims(&["exp", "sub", "iss"]);
            validation.set_issuer(&[iss]);
        } else {
            validation.set_required_spec_claims(&["exp", "sub"]);
        }

        Self {
            encoding,
            decoding,
            issuer: cfg.issuer.clone(),
            validation,
        }
    }

    /// Sign `claims`. The configured issuer overrides any `iss` on the claims.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::TokenSigning`] when no secret is configured or
    /// encoding fails.
    pub fn issue(&self, claims: &SessionClaims) -> Result<String, DomainError> {
        let key = self
            .encoding
            .as_ref()
            .ok_or_else(|| DomainError::TokenSigning("no session secret configured".to_owned()))?;

        let mut claims = claims.clone();
        if self.issuer.is_some() {
            claims.iss.clone_from(&self.issuer);
        }

        jsonwebtoken::encode(&Header::new(Algorithm::HS256), &claims, key)
            .map_err(|e| DomainError::TokenSigning(e.to_string()))
    }

    /// Verify signature, expiry and issuer.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::InvalidToken`] for any token that does not
    /// verify.
    pub fn verify(&self, token: &str) -> Result<SessionClaims, DomainError> {
        let key = self
            .decoding
            .as_ref()
            .ok_or_else(|| DomainError::InvalidToken("no session secret configured".to_owned()))?;

        let data = jsonwebtoken::decode::<SessionClaims>(token, key, &self.validation)?;
        Ok(data.claims)
    }
}
