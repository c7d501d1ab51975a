//! Site setup errors.

use std::path::PathBuf;

/// Error returned when site content cannot be loaded.
///
/// Routing and rendering never error; only loading page sources and locale
/// tables can.
#[derive(Debug, thiserror::Error)]
pub enum SiteError {
    /// I/O error reading a page source.
    #[error("I/O error reading {}: {source}", .path.display())]
    Io {
        /// Page source path.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },

    /// Locale tables failed to load.
    #[error(transparent)]
    Locale(#[from] eldoc_i18n::LocaleError),
}
