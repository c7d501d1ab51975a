//! View model for one rendered frame of the site shell.
//!
//! [`compose`] turns the current route into a [`Frame`]: header, side
//! navigation, content pane and footer. The frame is plain data; see
//! [`render_frame`](crate::render_frame) for HTML output.

use eldoc_i18n::{Locale, LocaleKey, LocaleStore};
use eldoc_router::{DEFAULT_FALLBACK_PAGE, DEFAULT_STORAGE_KEY, Route};
use serde::Serialize;

use crate::registry::PageRegistry;

/// Site-wide settings the shell renders with.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SiteSettings {
    /// Title shown in the footer and as logo alt text.
    pub title: String,
    /// Locale applied on first mount when the URL has none.
    ///
    /// Also used for links while the route carries no locale.
    pub default_locale: Option<Locale>,
    /// Page shown for absent or malformed fragments.
    pub fallback_page: String,
    /// Durable storage key for the resolved locale.
    pub storage_key: String,
    /// Base URL of the sibling site (guide and resource links).
    pub site_url: String,
    /// Repository URL (issue tracker and contribution guide).
    pub repository_url: String,
}

impl Default for SiteSettings {
    fn default() -> Self {
        Self {
            title: "Element-React".to_owned(),
            default_locale: Some(Locale::default()),
            fallback_page: DEFAULT_FALLBACK_PAGE.to_owned(),
            storage_key: DEFAULT_STORAGE_KEY.to_owned(),
            site_url: "http://element.eleme.io".to_owned(),
            repository_url: "https://github.com/eleme/element-react".to_owned(),
        }
    }
}

/// One rendered frame.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Frame {
    /// Top bar.
    pub header: Header,
    /// Side navigation tree.
    pub side_nav: SideNav,
    /// Content pane; `None` renders an empty pane.
    pub content: Option<Content>,
    /// Bottom bar.
    pub footer: Footer,
}

/// Top bar: logo, site links and locale toggle.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Header {
    /// Logo alt text.
    pub title: String,
    /// Site navigation links.
    pub links: Vec<Link>,
    /// Locale toggle entries, one per supported locale.
    pub locales: Vec<LocaleToggle>,
}

/// A labelled link. `href` is `None` for the current section.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Link {
    /// Display text (blank if untranslated).
    pub label: String,
    /// Link target.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub href: Option<String>,
    /// Highlighted state.
    pub active: bool,
}

/// Locale toggle entry.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct LocaleToggle {
    /// Locale code.
    pub code: String,
    /// Display label.
    pub label: String,
    /// Fragment switching to this locale on the current page.
    pub href: String,
    /// Whether this is the current locale.
    pub active: bool,
}

/// Side navigation tree.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SideNav {
    /// Heading over the documents list.
    pub documents_title: String,
    /// Document links.
    pub documents: Vec<NavLink>,
    /// Heading over the component groups.
    pub components_title: String,
    /// Component groups.
    pub groups: Vec<NavGroup>,
}

/// Named group of component links.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct NavGroup {
    /// Group name, unlocalized.
    pub name: String,
    /// Page links.
    pub links: Vec<NavLink>,
}

/// Link to a registry page.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct NavLink {
    /// Page key.
    pub page: String,
    /// Localized page title (blank if untranslated).
    pub label: String,
    /// Fragment encoding locale and page.
    pub href: String,
    /// Whether this is the current page.
    pub active: bool,
}

/// Rendered page in the content pane.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Content {
    /// Page key.
    pub page: String,
    /// Page body HTML.
    pub html: String,
}

/// Bottom bar.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Footer {
    /// Site title.
    pub title: String,
    /// Feedback and contribution links.
    pub links: Vec<Link>,
    /// Repository link behind the social icon.
    pub repository_url: String,
}

/// Compose the frame for a route.
///
/// Strings come from `locales`, which must already follow the route's
/// locale. Missing strings render blank; an unknown page renders an empty
/// content pane.
#[must_use]
pub fn compose(
    route: &Route,
    registry: &PageRegistry,
    locales: &LocaleStore,
    settings: &SiteSettings,
) -> Frame {
    let link_locale = route
        .locale
        .as_deref()
        .or_else(|| settings.default_locale.map(Locale::code));

    let content = registry.lookup(&route.page, locales).map(|page| Content {
        page: page.key().to_owned(),
        html: page.render(),
    });
    if content.is_none() {
        tracing::warn!(page = %route.page, "No page registered for route");
    }

    Frame {
        header: compose_header(route, locales, settings, link_locale),
        side_nav: compose_side_nav(route, registry, locales, link_locale),
        content,
        footer: compose_footer(locales, settings),
    }
}

fn text(locales: &LocaleStore, section: &str, leaf: &str) -> String {
    locales
        .text_or_blank(&LocaleKey::new(section, leaf))
        .to_owned()
}

fn compose_header(
    route: &Route,
    locales: &LocaleStore,
    settings: &SiteSettings,
    link_locale: Option<&str>,
) -> Header {
    let locale_segment = link_locale.unwrap_or_default();
    let site_url = settings.site_url.trim_end_matches('/');

    let links = vec![
        Link {
            label: text(locales, "misc", "guide"),
            href: Some(format!("{site_url}/#/{locale_segment}/guide/design")),
            active: false,
        },
        Link {
            label: text(locales, "misc", "component"),
            href: None,
            active: true,
        },
        Link {
            label: text(locales, "misc", "resource"),
            href: Some(format!("{site_url}/#/{locale_segment}/resource")),
            active: false,
        },
    ];

    let locales = Locale::ALL
        .into_iter()
        .map(|locale| LocaleToggle {
            code: locale.code().to_owned(),
            label: locale.label().to_owned(),
            href: Route::fragment_for(Some(locale.code()), &route.page),
            active: route.locale.as_deref() == Some(locale.code()),
        })
        .collect();

    Header {
        title: settings.title.clone(),
        links,
        locales,
    }
}

fn compose_side_nav(
    route: &Route,
    registry: &PageRegistry,
    locales: &LocaleStore,
    link_locale: Option<&str>,
) -> SideNav {
    let nav_link = |page: &String| NavLink {
        page: page.clone(),
        label: locales.text_or_blank(&LocaleKey::page(page)).to_owned(),
        href: Route::fragment_for(link_locale, page),
        active: *page == route.page,
    };

    SideNav {
        documents_title: text(locales, "misc", "development"),
        documents: registry.documents().iter().map(nav_link).collect(),
        components_title: text(locales, "misc", "components"),
        groups: registry
            .groups()
            .iter()
            .map(|group| NavGroup {
                name: group.name.clone(),
                links: group.pages.iter().map(nav_link).collect(),
            })
            .collect(),
    }
}

fn compose_footer(locales: &LocaleStore, settings: &SiteSettings) -> Footer {
    let repo = settings.repository_url.trim_end_matches('/');
    Footer {
        title: settings.title.clone(),
        links: vec![
            Link {
                label: text(locales, "misc", "feedback"),
                href: Some(format!("{repo}/issues")),
                active: false,
            },
            Link {
                label: text(locales, "misc", "contribution"),
                href: Some(format!("{repo}/blob/master/CONTRIBUTING.md")),
                active: false,
            },
        ],
        repository_url: repo.to_owned(),
    }
}

impl Frame {
    /// The highlighted navigation link, if the current page is in the nav.
    #[must_use]
    pub fn active_link(&self) -> Option<&NavLink> {
        self.side_nav
            .documents
            .iter()
            .chain(self.side_nav.groups.iter().flat_map(|g| g.links.iter()))
            .find(|link| link.active)
    }
}
