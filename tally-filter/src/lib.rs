//! Implements visit exclusion for tracking hits.
//!
//! Every incoming hit passes through the exclusion filters exactly once
//! before it is recorded as a visit. A hit may be excluded based on the
//! following criteria:
//!
//! * prefetch (hits issued by browser prefetching or for static assets)
//! * excluded query parameters (site-configured opt-out markers)
//! * excluded IPs (site-configured addresses, networks and wildcard ranges)
//! * excluded user agents (site-configured substrings)
//! * known bots (crawler address ranges and user agent signatures)
//! * referrer spam (hits whose referrer is a known spam domain)
//!
//! The filters run synchronously on the tracking hot path. They are
//! infallible by design: malformed configuration entries or unparseable
//! request data degrade to "rule does not match" and evaluation continues.
#![warn(missing_docs)]

pub mod bots;
pub mod excluded_ips;
pub mod excluded_params;
pub mod prefetch;
pub mod referrer_spam;
pub mod user_agents;

mod common;
mod config;
mod interface;
mod signatures;

#[cfg(test)]
mod testutils;

pub use crate::common::*;
pub use crate::config::*;
pub use crate::interface::{Trackable, TrackingRequest};
pub use crate::signatures::{SignatureSet, SignatureSetBuilder};

/// Checks whether a tracking hit should be excluded for a particular site.
///
/// If the hit should be excluded, the `Err` contains the reason of the first
/// rule that fired. The rules run in a fixed order with the cheap,
/// request-local checks first; each rule is a short-circuiting gate.
pub fn should_exclude<T: Trackable>(
    request: &T,
    config: &SiteFilterConfig,
    signatures: &SignatureSet,
) -> Result<(), ExclusionReason> {
    let verdict = evaluate(request, config, signatures);

    if let Err(reason) = verdict {
        tally_log::trace!(
            site_id = request.site_id(),
            reason = reason.name(),
            "visit excluded"
        );
    }

    verdict
}

fn evaluate<T: Trackable>(
    request: &T,
    config: &SiteFilterConfig,
    signatures: &SignatureSet,
) -> Result<(), ExclusionReason> {
    prefetch::should_exclude(request)?;
    excluded_params::should_exclude(request, &config.excluded_params)?;
    excluded_ips::should_exclude(request, &config.excluded_ips)?;
    user_agents::should_exclude(request, &config.excluded_user_agents, signatures)?;
    bots::should_exclude(request, signatures)?;
    referrer_spam::should_exclude(request, signatures)?;

    Ok(())
}
