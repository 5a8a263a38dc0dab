//! Filters hits whose referrer is a known referrer spam source.
//!
//! Referrer spammers issue fake hits with their own domain as the referrer
//! so it shows up in referrer reports. The hits are matched against a
//! process-wide blacklist of spam domains; an entry may pin a path prefix to
//! only match a section of a host. Referrers that do not parse as URLs never
//! match.

use url::Url;

use crate::{ExclusionReason, SignatureSet, Trackable};

/// A single entry of the referrer spam blacklist.
///
/// Entries are written as `domain` or `domain/path`; a leading scheme is
/// tolerated and stripped. The domain matches the referrer host and all of
/// its subdomains; a path restricts the entry to referrers below that path.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SpamEntry {
    domain: String,
    path: Option<String>,
}

impl SpamEntry {
    /// Parses one blacklist entry, returning `None` for unusable input.
    pub fn parse(entry: &str) -> Option<Self> {
        let entry = entry.trim().to_lowercase();
        let entry = entry
            .strip_prefix("http://")
            .or_else(|| entry.strip_prefix("https://"))
            .unwrap_or(&entry);

        let (domain, path) = match entry.split_once('/') {
            Some((domain, "")) => (domain, None),
            Some((domain, path)) => (domain, Some(format!("/{path}"))),
            None => (entry, None),
        };

        if domain.is_empty() {
            return None;
        }

        Some(SpamEntry {
            domain: domain.to_owned(),
            path,
        })
    }

    /// Returns `true` if the referrer `host` and `path` fall under this
    /// entry. Expects a lowercased host.
    fn covers(&self, host: &str, path: &str) -> bool {
        let host_matches = host == self.domain
            || host
                .strip_suffix(&self.domain)
                .is_some_and(|prefix| prefix.ends_with('.'));

        host_matches
            && self
                .path
                .as_ref()
                .is_none_or(|entry_path| path.starts_with(entry_path.as_str()))
    }
}

/// Checks if the hit's referrer is a known spam source.
pub fn matches<T: Trackable>(request: &T, signatures: &SignatureSet) -> bool {
    let Some(referrer) = request.referrer() else {
        return false;
    };

    let Ok(url) = Url::parse(referrer) else {
        return false;
    };

    let Some(host) = url.host_str() else {
        return false;
    };

    let host = host.to_lowercase();
    signatures
        .spam_referrers()
        .iter()
        .any(|entry| entry.covers(&host, url.path()))
}

/// Excludes hits referred by a known spam source.
pub fn should_exclude<T: Trackable>(
    request: &T,
    signatures: &SignatureSet,
) -> Result<(), ExclusionReason> {
    if matches(request, signatures) {
        return Err(ExclusionReason::ReferrerSpam);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutils;

    #[test]
    fn test_known_spam_domains() {
        let signatures = SignatureSet::default();

        let spam = [
            "http://semalt.com",
            "http://semalt.com/random/sub/page",
            "http://semalt.com/out/of/here?mate",
            "https://www.semalt.com/",
            "http://crawler.semalt.com/project",
        ];
        for referrer in spam {
            let request = testutils::request_with_referrer(referrer);
            assert!(
                matches(&request, &signatures),
                "`{referrer}` should be spam"
            );
            assert_eq!(
                should_exclude(&request, &signatures),
                Err(ExclusionReason::ReferrerSpam)
            );
        }

        let valid = [
            "http://valid.domain/",
            "http://valid.domain/page",
            "http://notsemalt.com/",
            "http://semalt.com.example.org/",
        ];
        for referrer in valid {
            let request = testutils::request_with_referrer(referrer);
            assert!(
                !matches(&request, &signatures),
                "`{referrer}` should not be spam"
            );
        }
    }

    #[test]
    fn test_path_prefix_entries() {
        let signatures = SignatureSet::builder()
            .spam_referrer("shared.example/buttons")
            .build();

        let request = testutils::request_with_referrer("http://shared.example/buttons/count");
        assert!(matches(&request, &signatures));

        let request = testutils::request_with_referrer("http://shared.example/blog");
        assert!(!matches(&request, &signatures));
    }

    #[test]
    fn test_malformed_referrers_never_match() {
        let signatures = SignatureSet::default();

        for referrer in ["not a url", "/relative/path", "semalt.com/no/scheme", ""] {
            let request = testutils::request_with_referrer(referrer);
            assert!(
                !matches(&request, &signatures),
                "`{referrer}` should not match"
            );
        }
    }

    #[test]
    fn test_missing_referrer_never_matches() {
        let request = testutils::request_with_ip("93.184.216.34");
        assert!(!matches(&request, &SignatureSet::default()));
    }

    #[test]
    fn test_entry_parsing() {
        assert_eq!(
            SpamEntry::parse("http://semalt.com"),
            SpamEntry::parse("semalt.com")
        );
        assert_eq!(
            SpamEntry::parse("SEMALT.com/"),
            SpamEntry::parse("semalt.com")
        );
        assert_eq!(SpamEntry::parse(""), None);
        assert_eq!(SpamEntry::parse("/just/a/path"), None);
    }
}
