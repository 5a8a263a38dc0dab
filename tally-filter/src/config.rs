//! Config structs for all visit exclusion filters.
//!
//! These are per-site settings, loaded from site configuration storage and
//! treated as an immutable snapshot for the duration of one evaluation.

use serde::{Deserialize, Serialize};

/// Configuration for the excluded IPs filter.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExcludedIpsFilterConfig {
    /// Excluded client addresses.
    ///
    /// Each entry is an exact address (IPv4 or IPv6), a CIDR network, or a
    /// dotted wildcard form like `192.168.1.*`. Entries that parse as none
    /// of these are skipped at match time.
    pub excluded_ips: Vec<String>,
}

impl ExcludedIpsFilterConfig {
    /// Returns true if no configuration for this filter is given.
    pub fn is_empty(&self) -> bool {
        self.excluded_ips.is_empty()
    }
}

/// Configuration for the excluded user agents filter.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserAgentsFilterConfig {
    /// Specifies whether this site opted into user agent exclusion.
    ///
    /// The rule also runs when the process-wide default policy enables it,
    /// see [`SignatureSet::user_agent_exclusion_default`].
    ///
    /// [`SignatureSet::user_agent_exclusion_default`]:
    /// crate::SignatureSet::user_agent_exclusion_default
    pub is_enabled: bool,

    /// Comma-separated substrings; a hit is excluded when its user agent
    /// contains any of them, case-insensitively.
    #[serde(default)]
    pub excluded_user_agents: String,
}

impl UserAgentsFilterConfig {
    /// Returns true if no configuration for this filter is given.
    pub fn is_empty(&self) -> bool {
        !self.is_enabled && self.excluded_user_agents.is_empty()
    }
}

/// Configuration for the excluded query parameters filter.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExcludedParamsFilterConfig {
    /// Names of query parameters that opt a hit out of tracking when they
    /// are present with a truthy value.
    pub excluded_params: Vec<String>,
}

impl ExcludedParamsFilterConfig {
    /// Returns true if no configuration for this filter is given.
    pub fn is_empty(&self) -> bool {
        self.excluded_params.is_empty()
    }
}

/// Configuration for all visit exclusion filters of one site.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteFilterConfig {
    /// Configuration for the excluded IPs filter.
    #[serde(default, skip_serializing_if = "ExcludedIpsFilterConfig::is_empty")]
    pub excluded_ips: ExcludedIpsFilterConfig,

    /// Configuration for the excluded user agents filter.
    #[serde(default, skip_serializing_if = "UserAgentsFilterConfig::is_empty")]
    pub excluded_user_agents: UserAgentsFilterConfig,

    /// Configuration for the excluded query parameters filter.
    #[serde(default, skip_serializing_if = "ExcludedParamsFilterConfig::is_empty")]
    pub excluded_params: ExcludedParamsFilterConfig,
}

impl SiteFilterConfig {
    /// Returns true if there are no filter configurations declared.
    pub fn is_empty(&self) -> bool {
        self.excluded_ips.is_empty()
            && self.excluded_user_agents.is_empty()
            && self.excluded_params.is_empty()
    }
}
