//! Detects hits from known search engine crawlers and malicious bots.
//!
//! A hit counts as a bot hit when its client address falls into one of the
//! known crawler networks, or when its user agent carries a crawler
//! signature. Bot hits are only excluded when the request did not opt into
//! bot counting (`bots=1`); with bot counting enabled the hit passes and
//! the caller decides how to record it.

use crate::{ExclusionReason, SignatureSet, Trackable};

/// Checks if the hit originates from a known bot, regardless of the
/// request's bot counting preference.
pub fn matches<T: Trackable>(request: &T, signatures: &SignatureSet) -> bool {
    if let Some(user_agent) = request.user_agent() {
        if signatures.is_crawler_user_agent(user_agent) {
            return true;
        }
    }

    if let Some(addr) = request.ip_addr() {
        if signatures
            .bot_networks()
            .iter()
            .any(|network| network.contains(addr))
        {
            return true;
        }
    }

    false
}

/// Excludes known bot hits unless the request opted into bot counting.
pub fn should_exclude<T: Trackable>(
    request: &T,
    signatures: &SignatureSet,
) -> Result<(), ExclusionReason> {
    if request.count_bots() {
        return Ok(());
    }

    if matches(request, signatures) {
        return Err(ExclusionReason::Bot);
    }

    Ok(())
}
