//! Filters hits originating from a site's excluded IP addresses.
//!
//! A site may exclude its own office ranges or known noise sources from
//! tracking. Every entry of the setting is one of three forms: an exact
//! address (IPv4 or IPv6), a CIDR network, or the legacy dotted wildcard
//! form handled by [`WildcardIp`]. Entries that parse as none of these are
//! skipped; a malformed setting must never keep a hit from being processed.

use std::net::IpAddr;

use ipnetwork::IpNetwork;
use tally_pattern::WildcardIp;

use crate::{ExcludedIpsFilterConfig, ExclusionReason, Trackable};

/// A parsed entry of the excluded IP setting.
#[derive(Clone, Debug, PartialEq)]
pub enum IpSpec {
    /// Byte equality with a single address.
    Exact(IpAddr),
    /// Containment in a CIDR network.
    Network(IpNetwork),
    /// The legacy dotted wildcard form, matched per octet.
    Wildcard(WildcardIp),
}

impl IpSpec {
    /// Parses one setting entry, returning `None` for unusable input.
    pub fn parse(spec: &str) -> Option<Self> {
        let spec = spec.trim();
        if spec.is_empty() {
            return None;
        }

        if let Ok(addr) = spec.parse::<IpAddr>() {
            return Some(IpSpec::Exact(addr));
        }

        if spec.contains('*') {
            return spec.parse::<WildcardIp>().ok().map(IpSpec::Wildcard);
        }

        spec.parse::<IpNetwork>().ok().map(IpSpec::Network)
    }

    /// Returns `true` if `addr` is covered by this entry.
    ///
    /// Exact entries compare the normalized binary address within one
    /// address family; an IPv4 entry never covers an IPv6 client and vice
    /// versa.
    pub fn covers(&self, addr: IpAddr) -> bool {
        match self {
            IpSpec::Exact(excluded) => *excluded == addr,
            IpSpec::Network(network) => network.contains(addr),
            IpSpec::Wildcard(wildcard) => wildcard.is_match(addr),
        }
    }
}

/// Checks if the client address is covered by any of the excluded IP
/// entries.
pub fn matches<It, S>(ip_addr: Option<IpAddr>, excluded_ips: It) -> bool
where
    It: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let Some(addr) = ip_addr else {
        return false;
    };

    excluded_ips
        .into_iter()
        .filter_map(|spec| IpSpec::parse(spec.as_ref()))
        .any(|spec| spec.covers(addr))
}

/// Excludes hits originating from the site's excluded addresses.
pub fn should_exclude<T: Trackable>(
    request: &T,
    config: &ExcludedIpsFilterConfig,
) -> Result<(), ExclusionReason> {
    if matches(request.ip_addr(), &config.excluded_ips) {
        return Err(ExclusionReason::IpAddress);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ip(s: &str) -> Option<IpAddr> {
        Some(s.parse().unwrap())
    }

    #[test]
    fn test_exact_address() {
        let excluded = &["12.12.12.12"];

        assert!(matches(ip("12.12.12.12"), excluded));
        assert!(!matches(ip("12.12.12.11"), excluded));
        assert!(!matches(ip("12.12.12.13"), excluded));
        assert!(!matches(ip("0.0.0.0"), excluded));
        assert!(!matches(ip("255.255.255.255"), excluded));
    }

    #[test]
    fn test_exact_address_ipv6() {
        let excluded = &["2001:db8::1"];

        assert!(matches(ip("2001:db8::1"), excluded));
        assert!(matches(ip("2001:db8:0:0:0:0:0:1"), excluded));
        assert!(!matches(ip("2001:db8::2"), excluded));
    }

    #[test]
    fn test_no_cross_family_match() {
        assert!(!matches(ip("::ffff:12.12.12.12"), &["12.12.12.12"]));
        assert!(!matches(ip("12.12.12.12"), &["::ffff:12.12.12.12"]));
    }

    #[test]
    fn test_single_address_network() {
        let excluded = &["12.12.12.12/32"];

        assert!(matches(ip("12.12.12.12"), excluded));
        assert!(!matches(ip("12.12.12.11"), excluded));
        assert!(!matches(ip("12.12.12.13"), excluded));
    }

    #[test]
    fn test_network() {
        let excluded = &["12.12.12.0/24"];

        assert!(matches(ip("12.12.12.0"), excluded));
        assert!(matches(ip("12.12.12.12"), excluded));
        assert!(matches(ip("12.12.12.255"), excluded));
        assert!(!matches(ip("12.12.11.255"), excluded));
        assert!(!matches(ip("12.12.13.0"), excluded));
        assert!(!matches(ip("0.0.0.0"), excluded));
        assert!(!matches(ip("255.255.255.255"), excluded));
    }

    #[test]
    fn test_network_ipv6() {
        let excluded = &["2001:db8::/32"];

        assert!(matches(ip("2001:db8::1"), excluded));
        assert!(matches(ip("2001:db8:ffff::1"), excluded));
        assert!(!matches(ip("2001:db9::1"), excluded));
    }

    #[test]
    fn test_wildcard_equals_slash_24() {
        // `12.12.12.*` excludes exactly the same addresses as
        // `12.12.12.0/24`.
        for excluded in [&["12.12.12.*"], &["12.12.12.0/24"]] {
            assert!(matches(ip("12.12.12.0"), excluded));
            assert!(matches(ip("12.12.12.12"), excluded));
            assert!(matches(ip("12.12.12.255"), excluded));
            assert!(!matches(ip("12.12.11.255"), excluded));
            assert!(!matches(ip("12.12.13.0"), excluded));
        }
    }

    #[test]
    fn test_multiple_entries() {
        let excluded = &["10.0.0.0/8", "12.12.12.12", "192.168.1.*"];

        assert!(matches(ip("10.1.2.3"), excluded));
        assert!(matches(ip("12.12.12.12"), excluded));
        assert!(matches(ip("192.168.1.77"), excluded));
        assert!(!matches(ip("12.12.12.13"), excluded));
    }

    #[test]
    fn test_empty_setting_never_excludes() {
        assert!(!matches(ip("12.12.12.12"), &[] as &[&str]));
        assert!(!matches(ip("12.12.12.12"), &[""]));
    }

    #[test]
    fn test_malformed_entries_are_skipped() {
        let excluded = &["lol/bar", "12.12.12.12"];

        assert!(matches(ip("12.12.12.12"), excluded));
        assert!(!matches(ip("12.12.12.13"), excluded));
    }

    #[test]
    fn test_missing_address_never_matches() {
        assert!(!matches(None, &["12.12.12.12"]));
    }
}
