//! Compiled search patterns used throughout Tally.
//!
//! [`Pattern`] backs report label search and user supplied exclusion
//! settings: a pattern string is compiled once and then tested against many
//! subjects. Matching is case-insensitive and partial, i.e. the pattern
//! matches if it occurs anywhere within the subject. An empty pattern
//! matches every subject.
//!
//! [`WildcardIp`] is the legacy dotted wildcard address form (`12.12.12.*`)
//! still accepted in excluded IP settings. It is matched numerically per
//! octet and never goes through the regex engine.
#![warn(missing_docs)]

use std::fmt;

use regex::{Regex, RegexBuilder};

mod wildcard;

pub use wildcard::WildcardIp;

/// Error compiling a [`Pattern`] or parsing a [`WildcardIp`].
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The pattern was declared to be a regular expression but does not
    /// compile as one.
    #[error("invalid regex pattern")]
    Regex(#[from] regex::Error),

    /// The dotted wildcard address form could not be parsed.
    #[error("invalid wildcard address `{0}`")]
    WildcardIp(String),
}

/// A compiled, reusable search pattern.
///
/// ```
/// use tally_pattern::Pattern;
///
/// let pattern = Pattern::new("index").unwrap();
/// assert!(pattern.is_match("site/INDEX.html"));
/// assert!(!pattern.is_match("site/home.html"));
/// ```
#[derive(Clone, Debug)]
pub struct Pattern {
    source: String,
    regex: Regex,
}

impl Pattern {
    /// Compiles `source` into a pattern.
    ///
    /// The source is trimmed and taken literally: regex metacharacters have
    /// no special meaning. Use [`Pattern::builder`] to compile a raw regular
    /// expression instead.
    pub fn new(source: &str) -> Result<Self, Error> {
        Self::builder(source).build()
    }

    /// Returns a builder to configure how `source` is compiled.
    pub fn builder(source: &str) -> PatternBuilder<'_> {
        PatternBuilder {
            source,
            raw_regex: false,
        }
    }

    /// The pattern source this matcher was compiled from.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Returns `true` if the pattern occurs anywhere within `subject`.
    pub fn is_match(&self, subject: &str) -> bool {
        self.regex.is_match(subject)
    }

    /// Tests an optional subject, negating the result if `invert` is set.
    ///
    /// A missing subject is treated as the empty string: it only matches the
    /// empty pattern.
    pub fn matches(&self, subject: Option<&str>, invert: bool) -> bool {
        self.is_match(subject.unwrap_or_default()) != invert
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

impl PartialEq for Pattern {
    fn eq(&self, other: &Self) -> bool {
        self.source == other.source
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Pattern {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.source())
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Pattern {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let source = std::borrow::Cow::<str>::deserialize(deserializer)?;
        Pattern::new(&source).map_err(serde::de::Error::custom)
    }
}

/// Builder for a [`Pattern`], returned from [`Pattern::builder`].
#[derive(Debug)]
pub struct PatternBuilder<'a> {
    source: &'a str,
    raw_regex: bool,
}

impl PatternBuilder<'_> {
    /// Treats the source as an already written regular expression instead of
    /// a literal, skipping metacharacter escaping.
    pub fn raw_regex(mut self, raw_regex: bool) -> Self {
        self.raw_regex = raw_regex;
        self
    }

    /// Compiles the pattern.
    pub fn build(self) -> Result<Pattern, Error> {
        let source = self.source.trim().to_owned();

        let expression = if self.raw_regex {
            source.clone()
        } else {
            regex::escape(&source)
        };

        let regex = RegexBuilder::new(&expression)
            .case_insensitive(true)
            .build()?;

        Ok(Pattern { source, regex })
    }
}
