//! Built-in page catalog for the component library site.
//!
//! Declares which pages exist and how navigation groups them. Page bodies are
//! read from `<source_dir>/<key>.md`.

use std::path::Path;
use std::sync::Arc;

use eldoc_i18n::LocaleTable;

use crate::SiteError;
use crate::page::MarkdownPage;
use crate::registry::PageRegistry;

/// Guide pages, in navigation order.
pub const DOCUMENTS: &[&str] = &["install", "quick-start", "i18n", "custom-theme"];

/// Component groups and their pages, in navigation order.
pub const COMPONENT_GROUPS: &[(&str, &[&str])] = &[
    ("Basic", &["layout", "color", "typography", "icon", "button"]),
    (
        "Form",
        &[
            "radio",
            "checkbox",
            "input",
            "input-number",
            "select",
            "cascader",
            "switch",
            "slider",
            "time-picker",
            "date-picker",
            "upload",
            "rate",
            "color-picker",
            "form",
        ],
    ),
    ("Data", &["table", "tag", "progress", "tree", "pagination", "badge"]),
    (
        "Notice",
        &["alert", "loading", "message", "message-box", "notification"],
    ),
    ("Nav", &["menu", "tabs", "breadcrumb", "dropdown", "steps"]),
    (
        "Others",
        &["dialog", "tooltip", "popover", "card", "carousel", "collapse"],
    ),
];

/// Every catalog page key: documents first, then components by group.
pub fn page_keys() -> impl Iterator<Item = &'static str> {
    DOCUMENTS.iter().copied().chain(
        COMPONENT_GROUPS
            .iter()
            .flat_map(|(_, pages)| pages.iter().copied()),
    )
}

/// Build the registry for the catalog from markdown sources in `source_dir`.
///
/// A page without a source file is still registered and renders a heading
/// with its key. Any other read failure is an error.
pub fn load_registry(source_dir: &Path) -> Result<PageRegistry, SiteError> {
    let load = |key: &str| -> Result<Arc<MarkdownPage>, SiteError> {
        let path = source_dir.join(format!("{key}.md"));
        match std::fs::read_to_string(&path) {
            Ok(source) => Ok(Arc::new(MarkdownPage::new(source))),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::warn!(page = %key, path = %path.display(), "Page source missing, rendering placeholder");
                Ok(Arc::new(MarkdownPage::placeholder(key)))
            }
            Err(source) => Err(SiteError::Io { path, source }),
        }
    };

    let mut builder = PageRegistry::builder();
    for (group, pages) in COMPONENT_GROUPS {
        for &key in *pages {
            builder = builder.component(group, key, load(key)?);
        }
    }
    for &key in DOCUMENTS {
        builder = builder.document(key, load(key)?);
    }

    Ok(builder.build())
}

/// Load the built-in locale tables, replaced per locale by any
/// `<code>.toml` found in `overrides`.
pub fn load_locales(overrides: Option<&Path>) -> Result<LocaleTable, SiteError> {
    let table = LocaleTable::builtin()?;
    let table = match overrides {
        Some(dir) => table.with_overrides_from(dir)?,
        None => table,
    };
    tracing::debug!(locales = ?table.codes(), "Loaded locale tables");
    Ok(table)
}

/// Catalog pages without a `<key>.md` file in `source_dir`.
pub fn missing_sources(source_dir: &Path) -> Vec<&'static str> {
    page_keys()
        .filter(|key| !source_dir.join(format!("{key}.md")).is_file())
        .collect()
}
