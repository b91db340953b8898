//! Route classification table.
//!
//! Prefixes match whole path segments: `/menu` covers `/menu` and `/menu/x`
//! but not `/menus`. The bare `/` prefix covers the root page only.

use tenant_gate_sdk::{Role, RouteAccess, RouteClass, RouteSurface};

use crate::config::RoutesConfig;

#[derive(Debug, Clone)]
struct Prefix(Vec<String>);

impl Prefix {
    fn parse(raw: &str) -> Self {
        Self(segments(raw).map(str::to_owned).collect())
    }

    fn matches(&self, path: &[&str]) -> bool {
        if self.0.is_empty() {
            return path.is_empty();
        }
        path.len() >= self.0.len() && self.0.iter().zip(path).all(|(a, b)| a == b)
    }

    fn depth(&self) -> usize {
        self.0.len()
    }
}

#[derive(Debug, Clone)]
struct RoleRule {
    prefix: Prefix,
    roles: Vec<Role>,
}

/// Compiled form of [`RoutesConfig`].
#[derive(Debug, Clone)]
pub struct RouteTable {
    public: Vec<Prefix>,
    api: Prefix,
    billing: Vec<Prefix>,
    role_rules: Vec<RoleRule>,
}

impl RouteTable {
    #[must_use]
    pub fn new(cfg: &RoutesConfig) -> Self {
        Self {
            public: cfg.public_prefixes.iter().map(|p| Prefix::parse(p)).collect(),
            api: Prefix::parse(&cfg.api_prefix),
            billing: cfg.billing_prefixes.iter().map(|p| Prefix::parse(p)).collect(),
            role_rules: cfg
                .role_rules
                .iter()
                .map(|r| RoleRule {
                    prefix: Prefix::parse(&r.prefix),
                    roles: r.roles.clone(),
                })
                .collect(),
        }
    }

    /// Classify a request path. Query strings and fragments are ignored.
    ///
    /// Paths carrying dot segments or encoded separators are never public and
    /// never billing-recovery routes.
    #[must_use]
    pub fn classify(&self, raw_path: &str) -> RouteClass {
        let path = raw_path
            .find(['?', '#'])
            .map_or(raw_path, |idx| &raw_path[..idx]);
        let segs: Vec<&str> = segments(path).collect();
        let suspicious = segs.iter().any(|s| is_suspicious(s));

        let surface = if self.api.matches(&segs) {
            RouteSurface::Api
        } else {
            RouteSurface::Browser
        };

        let access = if !suspicious && self.public.iter().any(|p| p.matches(&segs)) {
            RouteAccess::Public
        } else {
            RouteAccess::Protected
        };

        let billing_recovery = !suspicious && self.billing.iter().any(|p| p.matches(&segs));

        let required_roles = self
            .role_rules
            .iter()
            .filter(|r| r.prefix.depth() > 0 && r.prefix.matches(&segs))
            .max_by_key(|r| r.prefix.depth())
            .map(|r| r.roles.clone());

        RouteClass {
            access,
            surface,
            billing_recovery,
            required_roles,
        }
    }
}

fn segments(path: &str) -> impl Iterator<Item = &str> {
    path.split('/').filter(|s| !s.is_empty())
}

fn is_suspicious(segment: &str) -> bool {
    if segment == "." || segment == ".." || segment.contains('\\') {
        return true;
    }
    let lower = segment.to_ascii_lowercase();
    lower.contains("%2e") || lower.contains("%2f") || lower.contains("%5c")
}
