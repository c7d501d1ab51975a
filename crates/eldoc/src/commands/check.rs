//! `eldoc check` command implementation.

use std::sync::Arc;

use clap::Args;
use eldoc_i18n::{Locale, LocaleKey, LocaleStore, LocaleTable};
use eldoc_site::catalog;

use super::CommonArgs;
use crate::error::CliError;
use crate::output::Output;

/// Shell strings every locale must define.
const SHELL_KEYS: &[&str] = &[
    "misc.guide",
    "misc.component",
    "misc.resource",
    "misc.development",
    "misc.components",
    "misc.feedback",
    "misc.contribution",
    "markdown.show",
    "markdown.hide",
];

/// Arguments for the check command.
#[derive(Args)]
pub(crate) struct CheckArgs {
    /// Skip checking for page source files.
    #[arg(long)]
    no_sources: bool,
}

impl CheckArgs {
    /// Execute the check command.
    ///
    /// # Errors
    ///
    /// Returns `CliError::Validation` if any translation or page source is
    /// missing.
    pub(crate) fn execute(self, common: &CommonArgs) -> Result<(), CliError> {
        let output = Output::new();
        let config = common.load_config(None)?;
        let table = Arc::new(catalog::load_locales(config.locales_dir.as_deref())?);

        let mut problems = 0;
        for locale in Locale::ALL {
            let missing = missing_translations(&table, locale.code())?;
            for key in &missing {
                output.warning(&format!("{locale}: missing translation {key}"));
            }
            problems += missing.len();
        }

        if !self.no_sources {
            let source_dir = &config.docs_resolved.source_dir;
            for key in catalog::missing_sources(source_dir) {
                output.warning(&format!(
                    "missing page source {}",
                    source_dir.join(format!("{key}.md")).display()
                ));
                problems += 1;
            }
        }

        if problems > 0 {
            return Err(CliError::Validation(format!("{problems} problem(s) found")));
        }
        output.success("All translations and page sources present");
        Ok(())
    }
}

/// Keys with no string in a locale: shell strings first, then page titles in
/// catalog order.
fn missing_translations(table: &Arc<LocaleTable>, code: &str) -> Result<Vec<LocaleKey>, CliError> {
    let mut store = LocaleStore::new(Arc::clone(table));
    store.set_locale(Some(code));

    let mut keys = SHELL_KEYS
        .iter()
        .map(|key| key.parse::<LocaleKey>())
        .collect::<Result<Vec<_>, _>>()?;
    keys.extend(catalog::page_keys().map(LocaleKey::page));

    Ok(keys
        .into_iter()
        .filter(|key| store.text(key).is_none_or(str::is_empty))
        .collect())
}
