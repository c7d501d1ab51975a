//! Locale table: locale code to sectioned strings.
//!
//! Each locale is a two-level mapping `section -> leaf -> string`, stored as
//! TOML:
//!
//! ```toml
//! [misc]
//! guide = "Guide"
//!
//! [markdown]
//! show = "Expand"
//! hide = "Hide"
//! ```
//!
//! The table is built once at startup and never mutated afterwards. Share it
//! behind an `Arc`.

use std::collections::{BTreeMap, HashMap};
use std::path::Path;

use crate::{Locale, LocaleError};

/// Leaf key to display string within one section.
pub type Section = BTreeMap<String, String>;

/// Section name to [`Section`] for one locale.
pub type Sections = BTreeMap<String, Section>;

const BUILTIN_ZH_CN: &str = include_str!("../locales/zh-CN.toml");
const BUILTIN_EN_US: &str = include_str!("../locales/en-US.toml");

/// Immutable mapping from locale code to [`Sections`].
#[derive(Clone, Debug, Default)]
pub struct LocaleTable {
    locales: HashMap<String, Sections>,
}

impl LocaleTable {
    /// Create an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Table with the strings compiled into this crate for every [`Locale`].
    pub fn builtin() -> Result<Self, LocaleError> {
        let mut table = Self::new();
        for locale in Locale::ALL {
            let source = match locale {
                Locale::ZhCn => BUILTIN_ZH_CN,
                Locale::EnUs => BUILTIN_EN_US,
            };
            table.insert(locale.code(), parse_sections(locale.code(), source)?);
        }
        Ok(table)
    }

    /// Replace locales with `<code>.toml` files found in `dir`.
    ///
    /// A file replaces the whole table for its locale; locales without a file
    /// keep their current strings. Non-TOML entries are ignored.
    pub fn with_overrides_from(mut self, dir: &Path) -> Result<Self, LocaleError> {
        let io_err = |source| LocaleError::Io {
            path: dir.to_path_buf(),
            source,
        };

        for entry in std::fs::read_dir(dir).map_err(io_err)? {
            let path = entry.map_err(io_err)?.path();
            if path.extension().is_none_or(|ext| ext != "toml") {
                continue;
            }
            let Some(code) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };

            let source = std::fs::read_to_string(&path).map_err(|source| LocaleError::Io {
                path: path.clone(),
                source,
            })?;
            let sections = parse_sections(code, &source)?;

            if Locale::from_code(code).is_none() {
                tracing::warn!(locale = %code, "Loaded strings for a locale the site does not link to");
            }
            tracing::debug!(locale = %code, path = %path.display(), "Loaded locale override");
            self.insert(code, sections);
        }

        Ok(self)
    }

    /// Insert or replace the strings for a locale code.
    pub fn insert(&mut self, code: impl Into<String>, sections: Sections) {
        self.locales.insert(code.into(), sections);
    }

    /// Strings for a locale code, `None` if the locale is unknown.
    #[must_use]
    pub fn get(&self, code: &str) -> Option<&Sections> {
        self.locales.get(code)
    }

    /// Known locale codes, sorted.
    #[must_use]
    pub fn codes(&self) -> Vec<&str> {
        let mut codes: Vec<_> = self.locales.keys().map(String::as_str).collect();
        codes.sort_unstable();
        codes
    }
}

/// Parse one locale's TOML source into [`Sections`].
fn parse_sections(locale: &str, source: &str) -> Result<Sections, LocaleError> {
    toml::from_str(source).map_err(|source| LocaleError::Parse {
        locale: locale.to_owned(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_builtin_has_all_locales() {
        let table = LocaleTable::builtin().unwrap();
        assert_eq!(table.codes(), vec!["en-US", "zh-CN"]);
    }

    #[test]
    fn test_builtin_sections_match_across_locales() {
        let table = LocaleTable::builtin().unwrap();
        let zh = table.get("zh-CN").unwrap();
        let en = table.get("en-US").unwrap();

        assert_eq!(
            zh.keys().collect::<Vec<_>>(),
            en.keys().collect::<Vec<_>>()
        );
        for (name, section) in zh {
            assert_eq!(
                section.keys().collect::<Vec<_>>(),
                en[name].keys().collect::<Vec<_>>(),
                "section {name} differs between locales"
            );
        }
    }

    #[test]
    fn test_builtin_markdown_labels() {
        let table = LocaleTable::builtin().unwrap();
        let zh = table.get("zh-CN").unwrap();
        assert_eq!(zh["markdown"]["show"], "显示代码");
        assert_eq!(zh["markdown"]["hide"], "隐藏代码");
    }

    #[test]
    fn test_unknown_locale_is_none() {
        let table = LocaleTable::builtin().unwrap();
        assert!(table.get("fr-FR").is_none());
    }

    #[test]
    fn test_overrides_replace_whole_locale() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("en-US.toml"), "[misc]\nguide = \"Handbook\"\n").unwrap();
        std::fs::write(dir.path().join("notes.txt"), "ignored").unwrap();

        let table = LocaleTable::builtin()
            .unwrap()
            .with_overrides_from(dir.path())
            .unwrap();

        let en = table.get("en-US").unwrap();
        assert_eq!(en["misc"]["guide"], "Handbook");
        assert!(!en.contains_key("page"));
        // Untouched locale keeps built-in strings
        assert_eq!(table.get("zh-CN").unwrap()["misc"]["guide"], "指南");
    }

    #[test]
    fn test_overrides_can_add_locale() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("fr-FR.toml"), "[misc]\nguide = \"Guide\"\n").unwrap();

        let table = LocaleTable::new().with_overrides_from(dir.path()).unwrap();
        assert_eq!(table.codes(), vec!["fr-FR"]);
    }

    #[test]
    fn test_invalid_override_is_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("en-US.toml"), "guide = 1\n").unwrap();

        let err = LocaleTable::new()
            .with_overrides_from(dir.path())
            .unwrap_err();
        assert!(matches!(err, LocaleError::Parse { ref locale, .. } if locale == "en-US"));
    }

    #[test]
    fn test_missing_override_dir_is_io_error() {
        let err = LocaleTable::new()
            .with_overrides_from(Path::new("/nonexistent/locales"))
            .unwrap_err();
        assert!(matches!(err, LocaleError::Io { .. }));
    }
}
