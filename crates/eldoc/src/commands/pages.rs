//! `eldoc pages` command implementation.

use std::sync::Arc;

use clap::Args;
use eldoc_i18n::{LocaleKey, LocaleStore};
use eldoc_site::catalog;

use super::CommonArgs;
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the pages command.
#[derive(Args)]
pub(crate) struct PagesArgs {
    /// Locale for page titles (default: configured default locale).
    #[arg(short, long)]
    locale: Option<String>,
}

impl PagesArgs {
    /// Execute the pages command.
    pub(crate) fn execute(self, common: &CommonArgs) -> Result<(), CliError> {
        let output = Output::new();
        let config = common.load_config(self.locale.as_deref())?;
        let table = catalog::load_locales(config.locales_dir.as_deref())?;
        let registry = catalog::load_registry(&config.docs_resolved.source_dir)?;

        let mut locales = LocaleStore::new(Arc::new(table));
        locales.set_locale(Some(config.default_locale().code()));
        let title = |key: &str| locales.text_or_blank(&LocaleKey::page(key)).to_owned();

        output.heading(locales.text_or_blank(&LocaleKey::new("misc", "development")));
        for key in registry.documents() {
            output.entry(key, &title(key));
        }
        output.heading(locales.text_or_blank(&LocaleKey::new("misc", "components")));
        for group in registry.groups() {
            output.print(&format!(" {}", group.name));
            for key in &group.pages {
                output.entry(key, &title(key));
            }
        }

        Ok(())
    }
}
