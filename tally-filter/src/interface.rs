//! This module contains the trait for hits that the exclusion filters can be
//! applied to, plus the canonical [`TrackingRequest`] implementation.

use std::collections::HashMap;
use std::net::IpAddr;

use percent_encoding::percent_decode_str;

use crate::common::is_truthy;

/// A single normalized tracking hit to which exclusion filters can be
/// applied.
///
/// The HTTP layer parses the raw request upstream; implementations of this
/// trait only hand the already extracted values to the filters.
pub trait Trackable {
    /// The identifier of the site that received the hit.
    fn site_id(&self) -> u64;

    /// The client address the hit originated from.
    ///
    /// If the hit was forwarded through proxies, this address should be
    /// derived from the `X-Forwarded-For` header. Otherwise, it is the
    /// remote socket address.
    fn ip_addr(&self) -> Option<IpAddr>;

    /// The raw user agent of the client that sent the hit.
    fn user_agent(&self) -> Option<&str>;

    /// The decoded referrer URL of the hit, if it carried one.
    fn referrer(&self) -> Option<&str>;

    /// Whether bot traffic should be recorded for this hit.
    ///
    /// Hits opt into bot counting with `bots=1`; by default known bots are
    /// not counted.
    fn count_bots(&self) -> bool;

    /// Whether the hit was flagged upstream as a browser prefetch or a
    /// request for an untrackable static asset.
    fn is_prefetch(&self) -> bool;

    /// Looks up a tracking query parameter by name.
    fn param(&self, name: &str) -> Option<&str>;
}

/// A normalized tracking request, built from the already parsed query
/// parameters of one tracking hit.
#[derive(Clone, Debug)]
pub struct TrackingRequest {
    site_id: u64,
    ip_addr: Option<IpAddr>,
    user_agent: Option<String>,
    referrer: Option<String>,
    count_bots: bool,
    prefetch: bool,
    params: HashMap<String, String>,
}

impl TrackingRequest {
    /// Creates a request for `site_id` with no further data.
    ///
    /// Bot counting starts out disabled, matching a hit without a `bots`
    /// parameter.
    pub fn new(site_id: u64) -> Self {
        Self {
            site_id,
            ip_addr: None,
            user_agent: None,
            referrer: None,
            count_bots: false,
            prefetch: false,
            params: HashMap::new(),
        }
    }

    /// Builds a request from the parsed query parameters of a tracking hit.
    ///
    /// Understands the tracker parameters relevant to exclusion: `bots`
    /// opts into bot counting, `urlref` carries the percent-encoded
    /// referrer. All parameters stay available through
    /// [`Trackable::param`].
    pub fn from_params(site_id: u64, params: HashMap<String, String>) -> Self {
        let mut request = Self::new(site_id);

        if let Some(bots) = params.get("bots") {
            request.count_bots = is_truthy(bots);
        }

        if let Some(urlref) = params.get("urlref") {
            let decoded = percent_decode_str(urlref).decode_utf8_lossy();
            if !decoded.is_empty() {
                request.referrer = Some(decoded.into_owned());
            }
        }

        request.params = params;
        request
    }

    /// Sets the client address.
    pub fn with_ip_addr(mut self, ip_addr: IpAddr) -> Self {
        self.ip_addr = Some(ip_addr);
        self
    }

    /// Sets the user agent.
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Sets the already decoded referrer URL.
    pub fn with_referrer(mut self, referrer: impl Into<String>) -> Self {
        self.referrer = Some(referrer.into());
        self
    }

    /// Sets whether bot traffic should be recorded for this hit.
    pub fn with_count_bots(mut self, count_bots: bool) -> Self {
        self.count_bots = count_bots;
        self
    }

    /// Flags the hit as a browser prefetch or static asset request.
    pub fn with_prefetch(mut self, prefetch: bool) -> Self {
        self.prefetch = prefetch;
        self
    }

    /// Adds a tracking query parameter.
    pub fn with_param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.insert(name.into(), value.into());
        self
    }
}

impl Trackable for TrackingRequest {
    fn site_id(&self) -> u64 {
        self.site_id
    }

    fn ip_addr(&self) -> Option<IpAddr> {
        self.ip_addr
    }

    fn user_agent(&self) -> Option<&str> {
        self.user_agent.as_deref()
    }

    fn referrer(&self) -> Option<&str> {
        self.referrer.as_deref()
    }

    fn count_bots(&self) -> bool {
        self.count_bots
    }

    fn is_prefetch(&self) -> bool {
        self.prefetch
    }

    fn param(&self, name: &str) -> Option<&str> {
        self.params.get(name).map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(entries: &[(&str, &str)]) -> HashMap<String, String> {
        entries
            .iter()
            .map(|&(name, value)| (name.to_owned(), value.to_owned()))
            .collect()
    }

    #[test]
    fn test_bots_param() {
        let request = TrackingRequest::from_params(1, params(&[]));
        assert!(!request.count_bots());

        let request = TrackingRequest::from_params(1, params(&[("bots", "0")]));
        assert!(!request.count_bots());

        let request = TrackingRequest::from_params(1, params(&[("bots", "1")]));
        assert!(request.count_bots());
    }

    #[test]
    fn test_urlref_is_percent_decoded() {
        let encoded = "http%3A%2F%2Fsemalt.com%2Fout%2Fof%2Fhere%3Fmate";
        let request = TrackingRequest::from_params(1, params(&[("urlref", encoded)]));
        assert_eq!(request.referrer(), Some("http://semalt.com/out/of/here?mate"));
    }

    #[test]
    fn test_empty_urlref_is_no_referrer() {
        let request = TrackingRequest::from_params(1, params(&[("urlref", "")]));
        assert_eq!(request.referrer(), None);
    }

    #[test]
    fn test_params_stay_available() {
        let request = TrackingRequest::from_params(7, params(&[("ignore_me", "1")]));
        assert_eq!(request.site_id(), 7);
        assert_eq!(request.param("ignore_me"), Some("1"));
        assert_eq!(request.param("other"), None);
    }
}
