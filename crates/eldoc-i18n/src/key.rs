//! Two-segment locale keys.

use std::fmt;
use std::str::FromStr;

use crate::LocaleError;

/// A fully-qualified `section.leaf` locale key.
///
/// Parsing rejects keys without a leaf, with an empty section or leaf, and
/// with more than two segments.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct LocaleKey {
    section: String,
    leaf: String,
}

impl LocaleKey {
    /// Create a key from its two segments.
    #[must_use]
    pub fn new(section: impl Into<String>, leaf: impl Into<String>) -> Self {
        Self {
            section: section.into(),
            leaf: leaf.into(),
        }
    }

    /// Key for a page title (`page.<key>`).
    #[must_use]
    pub fn page(page: &str) -> Self {
        Self::new("page", page)
    }

    /// Top-level section name.
    #[must_use]
    pub fn section(&self) -> &str {
        &self.section
    }

    /// Leaf key inside the section.
    #[must_use]
    pub fn leaf(&self) -> &str {
        &self.leaf
    }
}

impl FromStr for LocaleKey {
    type Err = LocaleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.split('.');
        match (parts.next(), parts.next(), parts.next()) {
            (Some(section), Some(leaf), None) if !section.is_empty() && !leaf.is_empty() => {
                Ok(Self::new(section, leaf))
            }
            _ => Err(LocaleError::InvalidKey(s.to_owned())),
        }
    }
}

impl fmt::Display for LocaleKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.section, self.leaf)
    }
}
