//! Host header normalization and platform-host detection.

use std::collections::HashSet;

const LOOPBACK_HOSTS: [&str; 3] = ["localhost", "127.0.0.1", "[::1]"];

/// Canonicalize a raw `Host` value: lowercase, no scheme, no userinfo, no
/// path, no port, no leading `www.`, no trailing dot.
///
/// Never fails. An empty result means "no host" and matches no tenant.
#[must_use]
pub fn normalize_host(raw: &str) -> String {
    let lowered = raw.trim().to_lowercase();

    let without_scheme = lowered
        .split_once("://")
        .map_or(lowered.as_str(), |(_, rest)| rest);
    let authority = without_scheme
        .find(['/', '?', '#'])
        .map_or(without_scheme, |idx| &without_scheme[..idx]);
    let authority = authority
        .rsplit_once('@')
        .map_or(authority, |(_, host)| host);

    let host = strip_port(authority);
    let host = host.strip_prefix("www.").unwrap_or(host);
    host.trim_end_matches('.').trim().to_owned()
}

fn strip_port(authority: &str) -> &str {
    if authority.starts_with('[') {
        // Bracketed IPv6 literal, optionally followed by `:port`.
        return authority
            .find(']')
            .map_or(authority, |end| &authority[..=end]);
    }
    if authority.matches(':').count() != 1 {
        return authority;
    }
    match authority.rsplit_once(':') {
        Some((name, port)) if port.chars().all(|c| c.is_ascii_digit()) => name,
        _ => authority,
    }
}

/// Hosts that resolve to the platform without a tenant lookup.
#[derive(Debug, Clone)]
pub struct PlatformHosts {
    hosts: HashSet<String>,
}

impl PlatformHosts {
    pub fn new<'a>(platform_domain: &str, dev_hosts: impl IntoIterator<Item = &'a str>) -> Self {
        let mut hosts: HashSet<String> = LOOPBACK_HOSTS.iter().map(|h| (*h).to_owned()).collect();
        let platform = normalize_host(platform_domain);
        if !platform.is_empty() {
            hosts.insert(platform);
        }
        hosts.extend(
            dev_hosts
                .into_iter()
                .map(normalize_host)
                .filter(|h| !h.is_empty()),
        );
        Self { hosts }
    }

    /// `canonical_host` must already be normalized.
    #[must_use]
    pub fn contains(&self, canonical_host: &str) -> bool {
        self.hosts.contains(canonical_host)
    }
}
