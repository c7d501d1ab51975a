//! `eldoc render` command implementation.

use std::sync::Arc;

use clap::Args;
use eldoc_router::MemoryLocation;
use eldoc_site::{App, catalog, render_document};

use super::{CommonArgs, open_storage, site_settings};
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the render command.
#[derive(Args)]
pub(crate) struct RenderArgs {
    /// URL fragment to mount on, e.g. `#/en-US/input`.
    #[arg(allow_hyphen_values = true, default_value = "")]
    fragment: String,

    /// Wrap the frame in a complete HTML document.
    #[arg(long, conflicts_with = "json")]
    document: bool,

    /// Print the frame view model as JSON instead of HTML.
    #[arg(long)]
    json: bool,
}

impl RenderArgs {
    /// Execute the render command.
    pub(crate) fn execute(self, common: &CommonArgs) -> Result<(), CliError> {
        let output = Output::new();
        let config = common.load_config(None)?;

        let storage = Arc::new(open_storage(&config)?);
        let locales = Arc::new(catalog::load_locales(config.locales_dir.as_deref())?);
        let registry = Arc::new(catalog::load_registry(&config.docs_resolved.source_dir)?);
        let location = Arc::new(MemoryLocation::new(&self.fragment));

        let mut app = App::new(location, storage, registry, locales, site_settings(&config));
        app.mount();

        let Some(frame) = app.frame() else {
            return Err(CliError::Validation("App did not reach a ready state".to_owned()));
        };
        if let Some(route) = app.route() {
            output.info(&format!("Rendering {}", route.fragment()));
        }

        if self.json {
            output.print(&serde_json::to_string_pretty(&frame)?);
        } else if self.document {
            output.print(&render_document(&frame, app.locales().locale()));
        } else {
            output.print(&eldoc_site::render_frame(&frame));
        }

        app.unmount();
        Ok(())
    }
}
