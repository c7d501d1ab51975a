//! Route resolution from URL fragments.
//!
//! Accepted fragment forms (leading `#` optional):
//!
//! ```text
//! #/<locale>/<page>   -> locale and page
//! #/<page>            -> page only, locale unset
//! ```
//!
//! Segments are non-empty, contain no `/`, and are percent-decoded. Anything
//! else, including `#//page`, `#/zh-CN/` and deeper paths, is malformed and
//! resolves to the fallback page without touching storage.

use std::sync::{Arc, LazyLock};

use percent_encoding::{AsciiSet, CONTROLS, percent_decode_str, utf8_percent_encode};
use regex::Regex;
use serde::Serialize;

use crate::ClientStorage;

/// Page shown when the fragment is absent or malformed.
pub const DEFAULT_FALLBACK_PAGE: &str = "install";

/// Storage key the resolved locale is written under.
pub const DEFAULT_STORAGE_KEY: &str = "ELEMENT_LANGUAGE";

static FRAGMENT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^#?(?:/([^/]+))?/([^/]+)$").unwrap());

/// Characters escaped when a segment is written back into a fragment.
const SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`');

/// Locale and page derived from a URL fragment.
///
/// Recomputed on every navigation; never stored on its own.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Route {
    /// Locale code, `None` when the fragment carried no locale segment.
    pub locale: Option<String>,
    /// Page registry key.
    pub page: String,
}

impl Route {
    /// Route with a locale and page.
    #[must_use]
    pub fn new(locale: Option<&str>, page: &str) -> Self {
        Self {
            locale: locale.map(ToOwned::to_owned),
            page: page.to_owned(),
        }
    }

    /// Fragment that resolves back to this route (`#/<locale>/<page>`).
    #[must_use]
    pub fn fragment(&self) -> String {
        Self::fragment_for(self.locale.as_deref(), &self.page)
    }

    /// Fragment for a locale and page without building a [`Route`].
    #[must_use]
    pub fn fragment_for(locale: Option<&str>, page: &str) -> String {
        let page = utf8_percent_encode(page, SEGMENT);
        match locale {
            Some(locale) => format!("#/{}/{page}", utf8_percent_encode(locale, SEGMENT)),
            None => format!("#/{page}"),
        }
    }
}

/// Parses fragments into [`Route`]s and persists the resolved locale.
///
/// Resolution is deterministic: the same fragment always yields the same
/// route. The storage write is the only side effect.
pub struct RouteResolver {
    storage: Arc<dyn ClientStorage>,
    fallback_page: String,
    storage_key: String,
}

impl RouteResolver {
    /// Create a resolver with the default fallback page and storage key.
    #[must_use]
    pub fn new(storage: Arc<dyn ClientStorage>) -> Self {
        Self {
            storage,
            fallback_page: DEFAULT_FALLBACK_PAGE.to_owned(),
            storage_key: DEFAULT_STORAGE_KEY.to_owned(),
        }
    }

    /// Set the page used for absent or malformed fragments.
    #[must_use]
    pub fn with_fallback_page(mut self, page: impl Into<String>) -> Self {
        self.fallback_page = page.into();
        self
    }

    /// Set the key the resolved locale is stored under.
    #[must_use]
    pub fn with_storage_key(mut self, key: impl Into<String>) -> Self {
        self.storage_key = key.into();
        self
    }

    /// Page used for absent or malformed fragments.
    #[must_use]
    pub fn fallback_page(&self) -> &str {
        &self.fallback_page
    }

    /// Resolve a fragment into a route.
    ///
    /// When the fragment carries a locale, it is written to storage. A
    /// page-only fragment resolves with no locale and leaves storage alone.
    /// A malformed fragment resolves to the fallback page with no locale.
    pub fn resolve(&self, fragment: &str) -> Route {
        self.try_resolve(fragment).unwrap_or_else(|| {
            tracing::debug!(fragment, fallback = %self.fallback_page, "Fragment not routable, using fallback page");
            Route::new(None, &self.fallback_page)
        })
    }

    /// Resolve a fragment, `None` if it does not match `#/<locale>/<page>` or
    /// `#/<page>`.
    ///
    /// Storage is written only on a match that carries a locale.
    pub fn try_resolve(&self, fragment: &str) -> Option<Route> {
        let route = parse_fragment(fragment)?;

        if let Some(locale) = &route.locale {
            self.storage.set(&self.storage_key, locale);
        }

        tracing::debug!(fragment, locale = ?route.locale, page = %route.page, "Resolved route");
        Some(route)
    }
}

/// Parse a fragment without side effects. `None` if malformed.
fn parse_fragment(fragment: &str) -> Option<Route> {
    let caps = FRAGMENT_RE.captures(fragment)?;
    let locale = caps.get(1).map(|m| decode_segment(m.as_str()));
    let page = decode_segment(caps.get(2)?.as_str());

    if page.is_empty() || locale.as_deref().is_some_and(str::is_empty) {
        return None;
    }

    Some(Route::new(locale.as_deref(), &page))
}

fn decode_segment(segment: &str) -> String {
    percent_decode_str(segment).decode_utf8_lossy().into_owned()
}
