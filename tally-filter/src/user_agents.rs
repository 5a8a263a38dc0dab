//! Filters hits from user agents the site has blacklisted.
//!
//! The setting is a comma-separated list of substrings; a hit is excluded
//! when its user agent contains any of them, case-insensitively. The rule
//! only runs for sites that opted in, or when the process-wide default
//! policy enables it for every site.

use crate::{ExclusionReason, SignatureSet, Trackable, UserAgentsFilterConfig};

/// Checks if the user agent contains any of the comma-separated excluded
/// substrings.
pub fn matches(user_agent: Option<&str>, excluded_user_agents: &str) -> bool {
    let Some(user_agent) = user_agent else {
        return false;
    };

    let user_agent = user_agent.to_lowercase();

    excluded_user_agents
        .split(',')
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .any(|token| user_agent.contains(&token.to_lowercase()))
}

/// Excludes hits from user agents matching the site's excluded substrings.
pub fn should_exclude<T: Trackable>(
    request: &T,
    config: &UserAgentsFilterConfig,
    signatures: &SignatureSet,
) -> Result<(), ExclusionReason> {
    if !config.is_enabled && !signatures.user_agent_exclusion_default() {
        return Ok(());
    }

    if matches(request.user_agent(), &config.excluded_user_agents) {
        return Err(ExclusionReason::UserAgent);
    }

    Ok(())
}
