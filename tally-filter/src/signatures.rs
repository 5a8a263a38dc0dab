//! Process-wide signature tables shared by all evaluations.
//!
//! The tables are built once at process startup and then only read, so a
//! single [`SignatureSet`] can be shared by reference across all request
//! workers.

use ipnetwork::IpNetwork;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::referrer_spam::SpamEntry;

/// Address ranges of known search engine crawlers and known-malicious bots.
///
/// Entries are exact addresses or CIDR networks.
const BOT_NETWORKS: &[&str] = &[
    // Google crawlers
    "64.233.160.0/19",
    "66.102.0.0/20",
    "66.249.64.0/19",
    "72.14.192.0/18",
    "74.125.0.0/16",
    "209.85.128.0/17",
    "216.239.32.0/19",
    // Microsoft / Bing
    "64.4.0.0/18",
    "65.52.0.0/14",
    "157.54.0.0/15",
    "157.56.0.0/14",
    "157.60.0.0/16",
    "207.46.0.0/16",
    "207.68.128.0/18",
    "207.68.192.0/20",
    // Yahoo
    "72.30.196.0/24",
    "72.30.198.0/20",
    "98.137.207.0/24",
    // ddos bot hammering tracked sites
    "1.202.218.8",
];

/// Referrer spam domains. An entry may carry a path prefix
/// (`domain/path`), in which case only referrers below that path match.
const SPAM_REFERRERS: &[&str] = &[
    "semalt.com",
    "buttons-for-website.com",
    "darodar.com",
    "econom.co",
    "ilovevitaly.co",
    "priceg.com",
    "blackhatworth.com",
    "hulfingtonpost.com",
    "o-o-6-o-o.com",
    "bestwebsitesawards.com",
];

static DEFAULT_BOT_NETWORKS: Lazy<Vec<IpNetwork>> = Lazy::new(|| {
    BOT_NETWORKS
        .iter()
        .map(|network| network.parse().expect("invalid bot network entry"))
        .collect()
});

static DEFAULT_SPAM_REFERRERS: Lazy<Vec<SpamEntry>> = Lazy::new(|| {
    SPAM_REFERRERS
        .iter()
        .filter_map(|entry| SpamEntry::parse(entry))
        .collect()
});

static CRAWLER_USER_AGENTS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?ix)
        Mediapartners-Google|
        AdsBot-Google|
        Googlebot|
        FeedFetcher-Google|
        BingBot|                    # Bing search
        BingPreview|
        msnbot|
        Baiduspider|                # Baidu search
        YandexBot|                  # Yandex search
        Slurp|                      # Yahoo
        Sogou|                      # Sogou
        DuckDuckBot|
        ia_archiver|                # Alexa
        bots?[/\s\);]|              # Generic bot
        spider[/\s\);]|             # Generic spider
        crawler                     # Generic crawler
    ",
    )
    .expect("invalid crawler user agent regex")
});

/// The process-wide, read-only signature tables consulted by the bot and
/// referrer spam rules, plus the global filter policy defaults.
///
/// Construct one [`SignatureSet`] at startup and share it by reference; it
/// is never mutated afterwards.
#[derive(Clone, Debug)]
pub struct SignatureSet {
    bot_networks: Vec<IpNetwork>,
    crawler_user_agents: Regex,
    spam_referrers: Vec<SpamEntry>,
    user_agent_exclusion_default: bool,
}

impl SignatureSet {
    /// Returns a builder starting from the built-in signature tables.
    pub fn builder() -> SignatureSetBuilder {
        SignatureSetBuilder {
            bot_networks: DEFAULT_BOT_NETWORKS.clone(),
            spam_referrers: DEFAULT_SPAM_REFERRERS.clone(),
            user_agent_exclusion_default: false,
        }
    }

    /// The known bot address ranges.
    pub fn bot_networks(&self) -> &[IpNetwork] {
        &self.bot_networks
    }

    /// Returns `true` if `user_agent` carries a known crawler signature.
    pub fn is_crawler_user_agent(&self, user_agent: &str) -> bool {
        self.crawler_user_agents.is_match(user_agent)
    }

    /// The known referrer spam entries.
    pub fn spam_referrers(&self) -> &[SpamEntry] {
        &self.spam_referrers
    }

    /// The global policy that runs the user agent exclusion rule even for
    /// sites that did not opt in themselves.
    pub fn user_agent_exclusion_default(&self) -> bool {
        self.user_agent_exclusion_default
    }
}

impl Default for SignatureSet {
    fn default() -> Self {
        Self::builder().build()
    }
}

/// Builder for a [`SignatureSet`], returned from [`SignatureSet::builder`].
///
/// All additions extend the built-in tables.
#[derive(Clone, Debug)]
pub struct SignatureSetBuilder {
    bot_networks: Vec<IpNetwork>,
    spam_referrers: Vec<SpamEntry>,
    user_agent_exclusion_default: bool,
}

impl SignatureSetBuilder {
    /// Adds a known bot address range.
    pub fn bot_network(mut self, network: IpNetwork) -> Self {
        self.bot_networks.push(network);
        self
    }

    /// Adds a referrer spam entry (`domain` or `domain/path`). Entries that
    /// do not parse are ignored.
    pub fn spam_referrer(mut self, entry: &str) -> Self {
        if let Some(entry) = SpamEntry::parse(entry) {
            self.spam_referrers.push(entry);
        }
        self
    }

    /// Sets the global user agent exclusion policy.
    pub fn user_agent_exclusion_default(mut self, enabled: bool) -> Self {
        self.user_agent_exclusion_default = enabled;
        self
    }

    /// Builds the immutable signature set.
    pub fn build(self) -> SignatureSet {
        SignatureSet {
            bot_networks: self.bot_networks,
            crawler_user_agents: CRAWLER_USER_AGENTS.clone(),
            spam_referrers: self.spam_referrers,
            user_agent_exclusion_default: self.user_agent_exclusion_default,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_tables_parse() {
        let signatures = SignatureSet::default();
        assert_eq!(signatures.bot_networks().len(), BOT_NETWORKS.len());
        assert_eq!(signatures.spam_referrers().len(), SPAM_REFERRERS.len());
        assert!(!signatures.user_agent_exclusion_default());
    }

    #[test]
    fn test_crawler_user_agents() {
        let signatures = SignatureSet::default();

        for user_agent in [
            "Googlebot/2.1 (+http://www.google.com/bot.html)",
            "Mozilla/5.0 (compatible; bingbot/2.0)",
            "Baiduspider+(+http://www.baidu.com/search/spider.htm)",
            "some generic bot; contact admin",
            "webcrawler deluxe",
        ] {
            assert!(
                signatures.is_crawler_user_agent(user_agent),
                "`{user_agent}` should be a crawler"
            );
        }

        for user_agent in [
            "Mozilla/5.0 (Windows NT 6.1) AppleWebKit/537.36 Chrome/41.0.2228.0",
            "opera",
            "chrome is here",
        ] {
            assert!(
                !signatures.is_crawler_user_agent(user_agent),
                "`{user_agent}` should not be a crawler"
            );
        }
    }

    #[test]
    fn test_builder_extends_tables() {
        let signatures = SignatureSet::builder()
            .bot_network("198.51.100.0/24".parse().unwrap())
            .spam_referrer("spam.example")
            .user_agent_exclusion_default(true)
            .build();

        assert_eq!(signatures.bot_networks().len(), BOT_NETWORKS.len() + 1);
        assert_eq!(signatures.spam_referrers().len(), SPAM_REFERRERS.len() + 1);
        assert!(signatures.user_agent_exclusion_default());
    }
}
