//! Utilities used by the visit exclusion filter tests.

use crate::TrackingRequest;

/// Creates a request originating from the given client address.
pub fn request_with_ip(addr: &str) -> TrackingRequest {
    TrackingRequest::new(1).with_ip_addr(addr.parse().expect("invalid test address"))
}

/// Creates a request with the specified user agent.
pub fn request_with_user_agent(user_agent: &str) -> TrackingRequest {
    TrackingRequest::new(1).with_user_agent(user_agent)
}

/// Creates a request with the specified (already decoded) referrer URL.
pub fn request_with_referrer(referrer: &str) -> TrackingRequest {
    TrackingRequest::new(1).with_referrer(referrer)
}
