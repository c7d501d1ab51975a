//! Locale loading errors.

use std::path::PathBuf;

/// Error returned when locale data cannot be loaded.
///
/// Only table construction is fallible. Lookups against a loaded table
/// resolve to `None` instead of erroring.
#[derive(Debug, thiserror::Error)]
pub enum LocaleError {
    /// I/O error reading a locale file or directory.
    #[error("I/O error reading {}: {source}", .path.display())]
    Io {
        /// File or directory being read.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },
    /// Locale file is not a valid sectioned TOML table.
    #[error("Invalid locale table for {locale}: {source}")]
    Parse {
        /// Locale code the file was loaded for.
        locale: String,
        /// Underlying TOML error.
        #[source]
        source: toml::de::Error,
    },
    /// Locale code outside the supported set.
    #[error("Unsupported locale: {0}")]
    UnsupportedLocale(String),
    /// Key is not of the form `section.leaf`.
    #[error("Invalid locale key: {0:?} (expected \"section.leaf\")")]
    InvalidKey(String),
}
