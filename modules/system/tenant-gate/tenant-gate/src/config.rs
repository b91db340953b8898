//! Configuration for the tenant gate.

use secrecy::SecretString;
use serde::Deserialize;
use tenant_gate_sdk::Role;

/// Module configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TenantGateConfig {
    /// Shared platform domain, e.g. `tablewise.app`. Compared after
    /// normalization, so `https://www.Tablewise.app:443` is the same host.
    pub platform_domain: String,

    /// Extra hosts treated as the platform (local development, previews).
    /// `localhost`, `127.0.0.1` and `[::1]` are always included.
    pub dev_hosts: Vec<String>,

    /// TTL of the per-host tenant lookup cache, in seconds. `0` disables it.
    pub tenant_cache_ttl_secs: u64,

    /// Upper bound on cached hosts. Once full, expired entries are dropped
    /// and a lookup that still finds no room is served uncached.
    pub tenant_cache_max_entries: usize,

    pub session: SessionConfig,

    pub routes: RoutesConfig,
}

impl Default for TenantGateConfig {
    fn default() -> Self {
        Self {
            platform_domain: "tablewise.app".to_owned(),
            dev_hosts: Vec::new(),
            tenant_cache_ttl_secs: 5,
            tenant_cache_max_entries: 10_000,
            session: SessionConfig::default(),
            routes: RoutesConfig::default(),
        }
    }
}

/// Session token verification settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SessionConfig {
    /// HMAC secret shared with the login service. An empty secret rejects
    /// every token.
    pub secret: SecretString,

    /// Expected `iss` claim, if any.
    pub issuer: Option<String>,

    /// Clock skew tolerated on `exp`, in seconds.
    pub leeway_secs: u64,

    /// Cookie carrying the session token for browser requests.
    pub cookie_name: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            secret: SecretString::from(String::new()),
            issuer: None,
            leeway_secs: 30,
            cookie_name: "session".to_owned(),
        }
    }
}

/// Route classification table. Owned by the HTTP layer, consumed by the gate.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RoutesConfig {
    /// Path prefixes reachable without a session. `/` matches the root only.
    pub public_prefixes: Vec<String>,

    /// Prefix marking the API surface (status codes instead of redirects).
    pub api_prefix: String,

    /// Billing-recovery prefixes, reachable while a subscription is lapsed.
    pub billing_prefixes: Vec<String>,

    /// Narrow role allow-lists. The longest matching prefix wins.
    pub role_rules: Vec<RoleRule>,

    /// Where browser requests without a session are sent.
    pub login_path: String,

    /// Where browser requests for a lapsed tenant are sent.
    pub billing_path: String,
}

impl Default for RoutesConfig {
    fn default() -> Self {
        Self {
            public_prefixes: [
                "/",
                "/menu",
                "/login",
                "/logout",
                "/static",
                "/health",
                "/api/public",
            ]
            .into_iter()
            .map(str::to_owned)
            .collect(),
            api_prefix: "/api".to_owned(),
            billing_prefixes: vec!["/billing".to_owned(), "/api/billing".to_owned()],
            role_rules: vec![
                RoleRule {
                    prefix: "/api/platform".to_owned(),
                    roles: vec![Role::PlatformOwner],
                },
                RoleRule {
                    prefix: "/admin".to_owned(),
                    roles: vec![Role::PlatformOwner],
                },
            ],
            login_path: "/login".to_owned(),
            billing_path: "/billing".to_owned(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RoleRule {
    pub prefix: String,
    pub roles: Vec<Role>,
}
