//! Locale lookups for the current locale.

use std::sync::Arc;

use crate::{LocaleKey, LocaleTable, Section};

/// Result of a dotted-key lookup.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LocaleValue<'a> {
    /// A leaf display string (`section.leaf`).
    Text(&'a str),
    /// A whole section (bare `section` key).
    Section(&'a Section),
}

impl<'a> LocaleValue<'a> {
    /// The display string, `None` for section results.
    #[must_use]
    pub fn as_text(self) -> Option<&'a str> {
        match self {
            Self::Text(text) => Some(text),
            Self::Section(_) => None,
        }
    }
}

/// Translated string lookups against a shared [`LocaleTable`].
///
/// Holds the current locale code, which follows the route. The code is kept
/// verbatim: a code missing from the table is valid and every lookup against
/// it resolves to `None`.
#[derive(Clone, Debug)]
pub struct LocaleStore {
    table: Arc<LocaleTable>,
    locale: Option<String>,
}

impl LocaleStore {
    /// Create a store with no current locale.
    #[must_use]
    pub fn new(table: Arc<LocaleTable>) -> Self {
        Self {
            table,
            locale: None,
        }
    }

    /// Set or clear the current locale code.
    pub fn set_locale(&mut self, locale: Option<&str>) {
        self.locale = locale.map(ToOwned::to_owned);
    }

    /// Current locale code.
    #[must_use]
    pub fn locale(&self) -> Option<&str> {
        self.locale.as_deref()
    }

    /// Shared table backing this store.
    #[must_use]
    pub fn table(&self) -> &Arc<LocaleTable> {
        &self.table
    }

    /// Look up a dotted key (`section.leaf`) in the current locale.
    ///
    /// A key without a leaf (`"misc"` or `"misc."`) returns the section
    /// itself. Keys with more than two segments, unknown locales, sections
    /// and leaves all return `None`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<LocaleValue<'_>> {
        let (section, leaf) = key.split_once('.').unwrap_or((key, ""));
        let section = self.sections()?.get(section)?;

        if leaf.is_empty() {
            return Some(LocaleValue::Section(section));
        }
        if leaf.contains('.') {
            return None;
        }
        section.get(leaf).map(|text| LocaleValue::Text(text.as_str()))
    }

    /// Look up a typed key in the current locale.
    #[must_use]
    pub fn text(&self, key: &LocaleKey) -> Option<&str> {
        self.sections()?
            .get(key.section())?
            .get(key.leaf())
            .map(String::as_str)
    }

    /// Look up a typed key, rendering a miss as an empty string.
    #[must_use]
    pub fn text_or_blank(&self, key: &LocaleKey) -> &str {
        self.text(key).unwrap_or_default()
    }

    fn sections(&self) -> Option<&crate::Sections> {
        self.table.get(self.locale.as_deref()?)
    }
}
