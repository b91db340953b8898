//! Host to tenant resolution with a short-lived read-through cache.

use std::sync::Arc;
use std::time::{Duration, Instant};

use dashmap::DashMap;
use tenant_gate_sdk::{HostKind, TenantContext};

use super::error::DomainError;
use super::host::PlatformHosts;
use super::repo::DistrictRepository;

/// Per-host cache of successful lookups, bounded to `capacity` entries.
///
/// Failures are never cached, and a failure empties the cache: after an
/// outage is observed no entry from before it may answer again.
#[derive(Debug)]
pub struct TenantCache {
    ttl: Duration,
    capacity: usize,
    entries: DashMap<String, (Instant, TenantContext)>,
}

impl TenantCache {
    #[must_use]
    pub fn new(ttl: Duration, capacity: usize) -> Self {
        Self {
            ttl,
            capacity,
            entries: DashMap::new(),
        }
    }

    fn get(&self, host: &str) -> Option<TenantContext> {
        if self.ttl.is_zero() {
            return None;
        }
        let hit = self
            .entries
            .get(host)
            .map(|entry| (entry.0.elapsed() < self.ttl, entry.1.clone()));
        match hit {
            Some((true, ctx)) => Some(ctx),
            Some((false, _)) => {
                self.entries.remove(host);
                None
            }
            None => None,
        }
    }

    fn put(&self, host: &str, ctx: &TenantContext) {
        if self.ttl.is_zero() || self.capacity == 0 {
            return;
        }
        if self.entries.len() >= self.capacity && !self.entries.contains_key(host) {
            let ttl = self.ttl;
            self.entries.retain(|_, (at, _)| at.elapsed() < ttl);
            if self.entries.len() >= self.capacity {
                tracing::debug!(capacity = self.capacity, "tenant cache full; lookup not cached");
                return;
            }
        }
        self.entries.insert(host.to_owned(), (Instant::now(), ctx.clone()));
    }

    fn clear(&self) {
        self.entries.clear();
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

pub struct TenantResolverService {
    platform_hosts: PlatformHosts,
    repo: Arc<dyn DistrictRepository>,
    cache: TenantCache,
}

impl TenantResolverService {
    #[must_use]
    pub fn new(
        platform_hosts: PlatformHosts,
        repo: Arc<dyn DistrictRepository>,
        cache: TenantCache,
    ) -> Self {
        Self {
            platform_hosts,
            repo,
            cache,
        }
    }

    #[must_use]
    pub fn cache(&self) -> &TenantCache {
        &self.cache
    }

    /// Resolve a canonical host. Never reads storage for platform hosts.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::Database`] when the district store fails. A
    /// missing or inactive district is `Ok` with no tenant.
    #[tracing::instrument(skip_all, fields(host = %canonical_host))]
    pub async fn resolve(&self, canonical_host: &str) -> Result<TenantContext, DomainError> {
        if self.platform_hosts.contains(canonical_host) {
            return Ok(TenantContext::platform());
        }
        if canonical_host.is_empty() {
            return Ok(TenantContext::unmatched());
        }
        if let Some(ctx) = self.cache.get(canonical_host) {
            tracing::trace!("tenant cache hit");
            return Ok(ctx);
        }

        let record = match self.repo.find_by_custom_domain(canonical_host).await {
            Ok(record) => record,
            Err(e) => {
                self.cache.clear();
                tracing::warn!(error = %e, "District lookup failed; tenant cache cleared");
                return Err(e);
            }
        };

        let ctx = match record {
            Some(d) if d.is_active => TenantContext {
                host_kind: HostKind::CustomDomain,
                tenant_id: Some(d.id),
                is_active: true,
                is_domain_verified: d.domain_verified,
                subscription_status: d.subscription_status,
            },
            _ => TenantContext::unmatched(),
        };

        self.cache.put(canonical_host, &ctx);
        Ok(ctx)
    }
}
