//! Supported site locales.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::LocaleError;

/// A locale the documentation site ships strings for.
///
/// The URL carries the locale as a raw code. Codes outside this set are still
/// routed, they just have no strings.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Locale {
    /// Simplified Chinese.
    #[default]
    #[serde(rename = "zh-CN")]
    ZhCn,
    /// US English.
    #[serde(rename = "en-US")]
    EnUs,
}

impl Locale {
    /// All supported locales, in toggle order.
    pub const ALL: [Self; 2] = [Self::ZhCn, Self::EnUs];

    /// Locale code as it appears in URL fragments and storage.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::ZhCn => "zh-CN",
            Self::EnUs => "en-US",
        }
    }

    /// Label shown in the header locale toggle.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::ZhCn => "中文",
            Self::EnUs => "En",
        }
    }

    /// Look up a supported locale by its exact code.
    #[must_use]
    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|locale| locale.code() == code)
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Locale {
    type Err = LocaleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_code(s).ok_or_else(|| LocaleError::UnsupportedLocale(s.to_owned()))
    }
}
