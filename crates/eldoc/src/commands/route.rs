//! `eldoc route` command implementation.

use std::sync::Arc;

use clap::Args;
use eldoc_router::{ClientStorage, MemoryStorage, RouteResolver};

use super::{CommonArgs, open_storage};
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the route command.
#[derive(Args)]
pub(crate) struct RouteArgs {
    /// URL fragment, e.g. `#/zh-CN/button`.
    #[arg(allow_hyphen_values = true)]
    fragment: String,

    /// Resolve without writing the locale to storage.
    #[arg(long)]
    dry_run: bool,
}

impl RouteArgs {
    /// Execute the route command.
    pub(crate) fn execute(self, common: &CommonArgs) -> Result<(), CliError> {
        let output = Output::new();
        let config = common.load_config(None)?;

        let storage: Arc<dyn ClientStorage> = if self.dry_run {
            Arc::new(MemoryStorage::new())
        } else {
            Arc::new(open_storage(&config)?)
        };

        let resolver = RouteResolver::new(storage)
            .with_fallback_page(config.site.fallback_page.clone())
            .with_storage_key(config.site.storage_key.clone());
        let route = resolver.resolve(&self.fragment);

        output.print(&serde_json::to_string_pretty(&route)?);
        Ok(())
    }
}
