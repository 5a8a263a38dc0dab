//! Filters hits that carry one of the site's opt-out query parameters.
//!
//! Sites can declare query parameter names whose presence with a truthy
//! value marks a hit as not-to-be-tracked, e.g. an `ignore` flag set by an
//! opt-out widget.

use crate::common::is_truthy;
use crate::{ExcludedParamsFilterConfig, ExclusionReason, Trackable};

/// Checks if any of the configured parameters is present with a truthy
/// value.
pub fn matches<T, It, S>(request: &T, excluded_params: It) -> bool
where
    T: Trackable,
    It: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    excluded_params
        .into_iter()
        .any(|name| request.param(name.as_ref()).is_some_and(is_truthy))
}

/// Excludes hits carrying a site-configured opt-out parameter.
pub fn should_exclude<T: Trackable>(
    request: &T,
    config: &ExcludedParamsFilterConfig,
) -> Result<(), ExclusionReason> {
    if matches(request, &config.excluded_params) {
        return Err(ExclusionReason::ExcludedParam);
    }

    Ok(())
}
