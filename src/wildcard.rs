//! Single-`*` origin patterns.
//!
//! A configured origin such as `https://*.example.com` is split at its first
//! `*` into a prefix and a suffix. A candidate matches when it starts with the
//! prefix, ends with the suffix, and is long enough that the two do not
//! overlap. Any further `*` characters stay in the suffix as literal text.
//!
//! Matching performs no normalization. Callers lower-case both sides before
//! comparing origins.

use std::fmt;

/// An origin pattern containing one `*`, stored as the text around it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WildcardPattern {
    prefix: String,
    suffix: String,
}

impl WildcardPattern {
    /// Split `pattern` at its first `*`.
    ///
    /// Returns `None` when the pattern contains no `*`.
    #[must_use]
    pub fn parse(pattern: &str) -> Option<Self> {
        let (prefix, suffix) = pattern.split_once('*')?;
        Some(Self::new(prefix, suffix))
    }

    /// Build a pattern from an explicit prefix and suffix.
    #[must_use]
    pub fn new(prefix: impl Into<String>, suffix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            suffix: suffix.into(),
        }
    }

    #[must_use]
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    #[must_use]
    pub fn suffix(&self) -> &str {
        &self.suffix
    }

    /// Test `candidate` against the pattern.
    #[inline]
    #[must_use]
    pub fn matches(&self, candidate: &str) -> bool {
        candidate.len() >= self.prefix.len() + self.suffix.len()
            && candidate.starts_with(&self.prefix)
            && candidate.ends_with(&self.suffix)
    }
}

impl fmt::Display for WildcardPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}*{}", self.prefix, self.suffix)
    }
}
