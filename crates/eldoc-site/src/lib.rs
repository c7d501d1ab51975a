//! Documentation site shell for eldoc.
//!
//! This crate provides:
//! - [`PageRegistry`]: Immutable page key to [`PageModule`] mapping, built
//!   from documents and component groups
//! - [`catalog`]: The built-in page catalog and its markdown sources
//! - [`compose`] / [`Frame`]: The view model for header, side nav, content
//!   and footer, rendered by [`render_frame`]
//! - [`App`]: View state driven by navigation events
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use eldoc_i18n::LocaleTable;
//! use eldoc_router::{MemoryLocation, MemoryStorage};
//! use eldoc_site::{App, MarkdownPage, PageRegistry, SiteSettings};
//!
//! let registry = PageRegistry::builder()
//!     .component("Basic", "button", Arc::new(MarkdownPage::new("# Button")))
//!     .build();
//! let location = Arc::new(MemoryLocation::new("#/en-US/button"));
//! let mut app = App::new(
//!     Arc::<MemoryLocation>::clone(&location),
//!     Arc::new(MemoryStorage::new()),
//!     Arc::new(registry),
//!     Arc::new(LocaleTable::builtin().unwrap()),
//!     SiteSettings::default(),
//! );
//!
//! app.mount();
//! let frame = app.frame().unwrap();
//! assert_eq!(frame.active_link().unwrap().label, "Button");
//! ```

mod app;
pub mod catalog;
mod error;
mod html;
mod page;
mod registry;
mod view;

pub use app::{App, ViewState};
pub use error::SiteError;
pub use html::{escape_html, render_document, render_frame};
pub use page::{MarkdownLabels, MarkdownPage, PageModule};
pub use registry::{ComponentGroup, ConfiguredPage, PageRegistry, PageRegistryBuilder};
pub use view::{
    Content, Footer, Frame, Header, Link, LocaleToggle, NavGroup, NavLink, SideNav, SiteSettings,
    compose,
};
