//! CLI command implementations.

pub(crate) mod check;
pub(crate) mod pages;
pub(crate) mod render;
pub(crate) mod route;

use std::path::{Path, PathBuf};

use clap::Args;
use eldoc_config::{CliSettings, Config};
use eldoc_router::FileStorage;
use eldoc_site::SiteSettings;

use crate::error::CliError;

pub(crate) use check::CheckArgs;
pub(crate) use pages::PagesArgs;
pub(crate) use render::RenderArgs;
pub(crate) use route::RouteArgs;

/// Flags shared by every command.
#[derive(Args)]
pub(crate) struct CommonArgs {
    /// Path to configuration file (default: auto-discover eldoc.toml).
    #[arg(short, long, global = true, env = "ELDOC_CONFIG")]
    config: Option<PathBuf>,

    /// Page source directory (overrides config).
    #[arg(short, long, global = true)]
    source_dir: Option<PathBuf>,

    /// Locale overrides directory (overrides config).
    #[arg(long, global = true)]
    locales_dir: Option<PathBuf>,

    /// Client storage file (overrides config).
    #[arg(long, global = true)]
    storage: Option<PathBuf>,

    /// Enable verbose output.
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

impl CommonArgs {
    /// Load config with CLI overrides applied.
    pub(crate) fn load_config(&self, locale: Option<&str>) -> Result<Config, CliError> {
        let cli_settings = CliSettings {
            source_dir: self.source_dir.clone(),
            locales_dir: self.locales_dir.clone(),
            storage_path: self.storage.clone(),
            default_locale: locale.map(str::to_owned),
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;

        if let Some(path) = &config.config_path {
            tracing::info!(path = %path.display(), "Loaded configuration");
        }
        Ok(config)
    }
}

/// Site settings from the `[site]` table.
pub(crate) fn site_settings(config: &Config) -> SiteSettings {
    SiteSettings {
        title: config.site.title.clone(),
        default_locale: Some(config.default_locale()),
        fallback_page: config.site.fallback_page.clone(),
        storage_key: config.site.storage_key.clone(),
        site_url: config.site.site_url.clone(),
        repository_url: config.site.repository_url.clone(),
    }
}

/// Open the configured client storage file.
///
/// The `.eldoc/` project directory is created only when the file lives in it.
pub(crate) fn open_storage(config: &Config) -> Result<FileStorage, CliError> {
    let project_dir = &config.docs_resolved.project_dir;
    if config.storage_path.starts_with(project_dir) {
        ensure_project_dir(project_dir)?;
    }
    Ok(FileStorage::open(&config.storage_path)?)
}

/// Ensure the `.eldoc/` project directory exists with a `.gitignore`.
fn ensure_project_dir(project_dir: &Path) -> Result<(), CliError> {
    std::fs::create_dir_all(project_dir)?;

    let gitignore_path = project_dir.join(".gitignore");
    if !gitignore_path.exists() {
        let _ = std::fs::write(&gitignore_path, "# Automatically created by eldoc\n*\n");
    }

    Ok(())
}
