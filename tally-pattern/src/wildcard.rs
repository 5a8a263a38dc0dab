use std::net::IpAddr;
use std::str::FromStr;

use crate::Error;

/// Constraint on a single octet of a wildcard address.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Segment {
    Any,
    Literal(u8),
}

impl Segment {
    fn matches(self, octet: u8) -> bool {
        match self {
            Segment::Any => true,
            Segment::Literal(expected) => expected == octet,
        }
    }
}

/// The legacy dotted wildcard IPv4 form, e.g. `12.12.*` or `12.12.12.*`.
///
/// A `*` segment admits any octet value, literal segments must equal the
/// octet exactly. Forms shorter than four segments must end in `*`; the
/// omitted trailing segments are wildcards as well, so `12.12.*` covers the
/// same addresses as `12.12.*.*`. Matching compares octet values, never
/// strings, and IPv6 addresses never match.
///
/// ```
/// use tally_pattern::WildcardIp;
///
/// let wildcard: WildcardIp = "12.12.12.*".parse().unwrap();
/// assert!(wildcard.is_match("12.12.12.0".parse().unwrap()));
/// assert!(wildcard.is_match("12.12.12.255".parse().unwrap()));
/// assert!(!wildcard.is_match("12.12.13.0".parse().unwrap()));
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WildcardIp {
    segments: [Segment; 4],
}

impl WildcardIp {
    /// Returns `true` if `addr` is covered by this wildcard form.
    pub fn is_match(&self, addr: IpAddr) -> bool {
        let IpAddr::V4(addr) = addr else {
            return false;
        };

        self.segments
            .iter()
            .zip(addr.octets())
            .all(|(segment, octet)| segment.matches(octet))
    }
}

impl FromStr for WildcardIp {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || Error::WildcardIp(s.to_owned());

        let parts: Vec<&str> = s.trim().split('.').collect();
        if parts.is_empty() || parts.len() > 4 {
            return Err(invalid());
        }

        // Short forms leave the remaining octets unconstrained, but only
        // when the last written segment is a wildcard.
        if parts.len() < 4 && parts.last() != Some(&"*") {
            return Err(invalid());
        }

        let mut segments = [Segment::Any; 4];
        for (segment, part) in segments.iter_mut().zip(parts) {
            *segment = match part {
                "*" => Segment::Any,
                literal => Segment::Literal(literal.parse().map_err(|_| invalid())?),
            };
        }

        Ok(WildcardIp { segments })
    }
}
