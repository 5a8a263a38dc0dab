use std::fmt;

use serde::Serialize;

/// Identifies which rule excluded a hit for which reason.
///
/// The variants are fed into tracking outcomes in kebab-case (e.g.
/// "referrer-spam").
#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum ExclusionReason {
    /// Excluded as a browser prefetch or static asset hit.
    Prefetch,

    /// Excluded by a site-configured opt-out query parameter.
    ExcludedParam,

    /// Excluded by the site's IP exclusion settings.
    IpAddress,

    /// Excluded by the site's user agent exclusion settings.
    UserAgent,

    /// Excluded as a known bot while bot counting was disabled.
    Bot,

    /// Excluded because the referrer is a known spam domain.
    ReferrerSpam,
}

impl ExclusionReason {
    /// Returns the string identifier of the exclusion reason.
    pub fn name(self) -> &'static str {
        match self {
            ExclusionReason::Prefetch => "prefetch",
            ExclusionReason::ExcludedParam => "excluded-param",
            ExclusionReason::IpAddress => "ip-address",
            ExclusionReason::UserAgent => "user-agent",
            ExclusionReason::Bot => "bot",
            ExclusionReason::ReferrerSpam => "referrer-spam",
        }
    }
}

impl fmt::Display for ExclusionReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl<'a> TryFrom<&'a str> for ExclusionReason {
    type Error = &'a str;

    fn try_from(value: &'a str) -> Result<Self, Self::Error> {
        Ok(match value {
            "prefetch" => ExclusionReason::Prefetch,
            "excluded-param" => ExclusionReason::ExcludedParam,
            "ip-address" => ExclusionReason::IpAddress,
            "user-agent" => ExclusionReason::UserAgent,
            "bot" => ExclusionReason::Bot,
            "referrer-spam" => ExclusionReason::ReferrerSpam,
            other => return Err(other),
        })
    }
}

/// Returns `true` for query parameter values that count as set.
///
/// The tracker treats `0`, `false` and the empty string as unset, anything
/// else as set.
pub(crate) fn is_truthy(value: &str) -> bool {
    !matches!(value.trim(), "" | "0" | "false" | "FALSE" | "False")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names_roundtrip() {
        let reasons = [
            ExclusionReason::Prefetch,
            ExclusionReason::ExcludedParam,
            ExclusionReason::IpAddress,
            ExclusionReason::UserAgent,
            ExclusionReason::Bot,
            ExclusionReason::ReferrerSpam,
        ];

        for reason in reasons {
            assert_eq!(ExclusionReason::try_from(reason.name()), Ok(reason));
        }

        assert_eq!(ExclusionReason::try_from("no-such-rule"), Err("no-such-rule"));
    }

    #[test]
    fn test_serializes_as_kebab_case() {
        let json = serde_json::to_string(&ExclusionReason::ReferrerSpam).unwrap();
        assert_eq!(json, "\"referrer-spam\"");
    }

    #[test]
    fn test_is_truthy() {
        for value in ["1", "true", "yes", " 2 "] {
            assert!(is_truthy(value), "`{value}` should be truthy");
        }
        for value in ["", "0", " 0 ", "false"] {
            assert!(!is_truthy(value), "`{value}` should be falsy");
        }
    }
}
