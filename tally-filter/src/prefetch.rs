//! Filters browser prefetch hits and hits for untrackable static assets.
//!
//! The signal is computed upstream when the HTTP layer inspects the request
//! headers (`Purpose: prefetch`, `X-Moz: prefetch`) and the requested path;
//! the filter only acts on the resulting flag.

use crate::{ExclusionReason, Trackable};

/// Checks if the hit was flagged as a prefetch or static asset request.
pub fn matches<T: Trackable>(request: &T) -> bool {
    request.is_prefetch()
}

/// Excludes hits flagged as prefetch or static asset requests.
pub fn should_exclude<T: Trackable>(request: &T) -> Result<(), ExclusionReason> {
    if matches(request) {
        return Err(ExclusionReason::Prefetch);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutils;

    #[test]
    fn test_prefetch_is_excluded() {
        let request = testutils::request_with_ip("93.184.216.34").with_prefetch(true);
        assert_eq!(should_exclude(&request), Err(ExclusionReason::Prefetch));
    }

    #[test]
    fn test_regular_hit_is_kept() {
        let request = testutils::request_with_ip("93.184.216.34");
        assert_eq!(should_exclude(&request), Ok(()));
    }
}
