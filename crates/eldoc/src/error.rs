//! CLI error types.

use eldoc_config::ConfigError;
use eldoc_i18n::LocaleError;
use eldoc_router::StorageError;
use eldoc_site::SiteError;

/// CLI error type.
#[derive(Debug, thiserror::Error)]
pub(crate) enum CliError {
    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Locale(#[from] LocaleError),

    #[error("{0}")]
    Storage(#[from] StorageError),

    #[error("{0}")]
    Site(#[from] SiteError),

    #[error("{0}")]
    Json(#[from] serde_json::Error),

    #[error("{0}")]
    Validation(String),
}
