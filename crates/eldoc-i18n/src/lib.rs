//! Locale tables and translated string lookup for eldoc.
//!
//! This crate provides:
//! - [`Locale`]: The locales the documentation site ships with
//! - [`LocaleKey`]: A two-segment `section.leaf` key
//! - [`LocaleTable`]: Immutable mapping of locale code to sectioned strings
//! - [`LocaleStore`]: Lookups against the table for the current locale
//!
//! Lookups never fail: an unknown locale, section or leaf resolves to `None`
//! and the view renders it as blank text. There is no fallback chain between
//! locales.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use eldoc_i18n::{LocaleStore, LocaleTable};
//!
//! let table = Arc::new(LocaleTable::builtin().unwrap());
//! let mut store = LocaleStore::new(table);
//! store.set_locale(Some("zh-CN"));
//! assert_eq!(store.get("misc.guide").and_then(|v| v.as_text()), Some("指南"));
//! ```

mod error;
mod key;
mod locale;
mod store;
mod table;

pub use error::LocaleError;
pub use key::LocaleKey;
pub use locale::Locale;
pub use store::{LocaleStore, LocaleValue};
pub use table::{LocaleTable, Section, Sections};
