//! The site shell: route state driven by navigation events.
//!
//! [`App`] owns the view state. It subscribes to a [`Location`] on
//! [`mount`](App::mount), and each call to
//! [`process_events`](App::process_events) applies every queued fragment
//! change in order. Each event becomes one route resolution and one state
//! update. Dropping or [unmounting](App::unmount) the app releases the
//! subscription.

use std::sync::Arc;

use eldoc_i18n::{LocaleStore, LocaleTable};
use eldoc_router::{
    ClientStorage, Location, NavigationEvents, Route, RouteResolver, Subscription,
};

use crate::html::render_frame;
use crate::registry::PageRegistry;
use crate::view::{Frame, SiteSettings, compose};

/// View state of the shell.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum ViewState {
    /// Not mounted yet, or unmounted.
    #[default]
    Uninitialized,
    /// Route resolved and ready to render.
    Ready {
        /// Locale code from the URL, if any.
        locale: Option<String>,
        /// Current page key.
        page: String,
    },
}

struct Mounted {
    events: NavigationEvents,
    _subscription: Subscription,
}

/// Documentation site shell.
pub struct App {
    location: Arc<dyn Location>,
    resolver: RouteResolver,
    registry: Arc<PageRegistry>,
    locales: LocaleStore,
    settings: SiteSettings,
    state: ViewState,
    mounted: Option<Mounted>,
}

impl App {
    /// Create an unmounted app.
    #[must_use]
    pub fn new(
        location: Arc<dyn Location>,
        storage: Arc<dyn ClientStorage>,
        registry: Arc<PageRegistry>,
        locales: Arc<LocaleTable>,
        settings: SiteSettings,
    ) -> Self {
        let resolver = RouteResolver::new(storage)
            .with_fallback_page(settings.fallback_page.clone())
            .with_storage_key(settings.storage_key.clone());

        Self {
            location,
            resolver,
            registry,
            locales: LocaleStore::new(locales),
            settings,
            state: ViewState::Uninitialized,
            mounted: None,
        }
    }

    /// Subscribe to navigation and resolve the current fragment.
    ///
    /// If the URL carries no locale and a default locale is configured, the
    /// app navigates to it before returning. Mounting twice is a no-op.
    pub fn mount(&mut self) {
        if self.mounted.is_some() {
            return;
        }

        let (events, subscription) = self.location.subscribe();
        self.mounted = Some(Mounted {
            events,
            _subscription: subscription,
        });

        let fragment = self.location.fragment();
        let route = self.handle_navigation(&fragment);
        tracing::debug!(%fragment, page = %route.page, "Mounted");

        if route.locale.is_none()
            && let Some(locale) = self.settings.default_locale
        {
            self.location
                .set_fragment(&Route::fragment_for(Some(locale.code()), &route.page));
            self.process_events();
        }
    }

    /// Apply every queued navigation event in arrival order.
    ///
    /// Returns the number of events processed. Does nothing when unmounted.
    pub fn process_events(&mut self) -> usize {
        let Some(mounted) = &self.mounted else {
            return 0;
        };
        let fragments: Vec<String> = mounted.events.pending().map(|e| e.fragment).collect();

        for fragment in &fragments {
            self.location.scroll_to_top();
            self.handle_navigation(fragment);
        }
        fragments.len()
    }

    /// Resolve a fragment and make it the current state.
    ///
    /// A fragment that does not route keeps the current locale and shows the
    /// fallback page. A page-only fragment clears the locale.
    pub fn handle_navigation(&mut self, fragment: &str) -> Route {
        let route = self.resolver.try_resolve(fragment).unwrap_or_else(|| {
            let locale = match &self.state {
                ViewState::Ready { locale, .. } => locale.as_deref(),
                ViewState::Uninitialized => None,
            };
            tracing::debug!(fragment, locale = ?locale, "Fragment not routable, keeping locale");
            Route::new(locale, self.resolver.fallback_page())
        });

        self.locales.set_locale(route.locale.as_deref());
        self.state = ViewState::Ready {
            locale: route.locale.clone(),
            page: route.page.clone(),
        };
        route
    }

    /// Navigate to the current page in another locale.
    ///
    /// Takes effect on the next [`process_events`](Self::process_events).
    pub fn set_locale(&self, code: &str) {
        let page = match &self.state {
            ViewState::Ready { page, .. } => page.as_str(),
            ViewState::Uninitialized => self.resolver.fallback_page(),
        };
        self.location
            .set_fragment(&Route::fragment_for(Some(code), page));
    }

    /// Unsubscribe from navigation and return to [`ViewState::Uninitialized`].
    pub fn unmount(&mut self) {
        self.mounted = None;
        self.state = ViewState::Uninitialized;
        self.locales.set_locale(None);
    }

    /// Whether the app is subscribed to navigation.
    #[must_use]
    pub fn is_mounted(&self) -> bool {
        self.mounted.is_some()
    }

    /// Current view state.
    #[must_use]
    pub fn state(&self) -> &ViewState {
        &self.state
    }

    /// Current route, once ready.
    #[must_use]
    pub fn route(&self) -> Option<Route> {
        match &self.state {
            ViewState::Ready { locale, page } => Some(Route::new(locale.as_deref(), page)),
            ViewState::Uninitialized => None,
        }
    }

    /// Locale strings following the current route.
    #[must_use]
    pub fn locales(&self) -> &LocaleStore {
        &self.locales
    }

    /// Compose the current frame, once ready.
    #[must_use]
    pub fn frame(&self) -> Option<Frame> {
        let route = self.route()?;
        Some(compose(&route, &self.registry, &self.locales, &self.settings))
    }

    /// Render the current frame to HTML, once ready.
    #[must_use]
    pub fn render_html(&self) -> Option<String> {
        self.frame().as_ref().map(render_frame)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use eldoc_router::{MemoryLocation, MemoryStorage};
    use pretty_assertions::assert_eq;

    use crate::page::{MarkdownPage, PageModule};

    struct Harness {
        location: Arc<MemoryLocation>,
        storage: Arc<MemoryStorage>,
        app: App,
    }

    fn harness(fragment: &str, settings: SiteSettings) -> Harness {
        let page = |s: &str| -> Arc<dyn PageModule> { Arc::new(MarkdownPage::new(s)) };
        let registry = PageRegistry::builder()
            .document("install", page("# Install"))
            .component("Basic", "button", page("# Button\n\n```js\n<Button />\n```\n"))
            .component("Form", "input", page("# Input"))
            .build();

        let location = Arc::new(MemoryLocation::new(fragment));
        let storage = Arc::new(MemoryStorage::new());
        let app = App::new(
            Arc::<MemoryLocation>::clone(&location),
            Arc::<MemoryStorage>::clone(&storage),
            Arc::new(registry),
            Arc::new(LocaleTable::builtin().unwrap()),
            settings,
        );
        Harness {
            location,
            storage,
            app,
        }
    }

    fn ready(locale: Option<&str>, page: &str) -> ViewState {
        ViewState::Ready {
            locale: locale.map(str::to_owned),
            page: page.to_owned(),
        }
    }

    #[test]
    fn test_uninitialized_before_mount() {
        let h = harness("#/zh-CN/button", SiteSettings::default());
        assert_eq!(h.app.state(), &ViewState::Uninitialized);
        assert!(h.app.frame().is_none());
        assert!(h.app.render_html().is_none());
        assert_eq!(h.location.subscriber_count(), 0);
    }

    #[test]
    fn test_mount_resolves_current_fragment() {
        let mut h = harness("#/zh-CN/button", SiteSettings::default());
        h.app.mount();

        assert_eq!(h.app.state(), &ready(Some("zh-CN"), "button"));
        assert_eq!(h.storage.get("ELEMENT_LANGUAGE").as_deref(), Some("zh-CN"));
        assert_eq!(h.location.subscriber_count(), 1);
        assert_eq!(h.app.locales().locale(), Some("zh-CN"));
    }

    #[test]
    fn test_navigation_moves_highlight_and_content() {
        let mut h = harness("#/zh-CN/button", SiteSettings::default());
        h.app.mount();

        let before = h.app.frame().unwrap();
        assert_eq!(before.active_link().unwrap().page, "button");
        assert_eq!(before.content.as_ref().unwrap().page, "button");

        h.location.set_fragment("#/en-US/input");
        assert_eq!(h.app.process_events(), 1);

        let after = h.app.frame().unwrap();
        assert_eq!(h.app.state(), &ready(Some("en-US"), "input"));
        assert_eq!(after.active_link().unwrap().page, "input");
        assert_eq!(after.content.as_ref().unwrap().html, "<h1>Input</h1>\n");
        assert_eq!(after.side_nav.documents_title, "Development");
        assert_eq!(h.storage.get("ELEMENT_LANGUAGE").as_deref(), Some("en-US"));
    }

    #[test]
    fn test_every_event_is_processed_in_order() {
        let mut h = harness("#/zh-CN/button", SiteSettings::default());
        h.app.mount();

        h.location.set_fragment("#/en-US/input");
        h.location.set_fragment("#/zh-CN/install");
        h.location.set_fragment("#/zh-CN/install");

        assert_eq!(h.app.process_events(), 2);
        assert_eq!(h.location.scroll_resets(), 2);
        assert_eq!(h.app.state(), &ready(Some("zh-CN"), "install"));
        assert_eq!(h.app.process_events(), 0);
    }

    #[test]
    fn test_mount_without_locale_applies_default() {
        let mut h = harness("", SiteSettings::default());
        h.app.mount();

        assert_eq!(h.location.fragment(), "#/zh-CN/install");
        assert_eq!(h.app.state(), &ready(Some("zh-CN"), "install"));
        assert_eq!(h.storage.get("ELEMENT_LANGUAGE").as_deref(), Some("zh-CN"));
    }

    #[test]
    fn test_mount_page_only_fragment_keeps_page() {
        let mut h = harness("#/button", SiteSettings::default());
        h.app.mount();

        assert_eq!(h.location.fragment(), "#/zh-CN/button");
        assert_eq!(h.app.state(), &ready(Some("zh-CN"), "button"));
    }

    #[test]
    fn test_mount_without_default_locale_stays_unset() {
        let settings = SiteSettings {
            default_locale: None,
            ..SiteSettings::default()
        };
        let mut h = harness("#/a/b/c", settings);
        h.app.mount();

        assert_eq!(h.app.state(), &ready(None, "install"));
        assert_eq!(h.location.fragment(), "#/a/b/c");
        assert!(h.storage.get("ELEMENT_LANGUAGE").is_none());

        let frame = h.app.frame().unwrap();
        assert_eq!(frame.side_nav.documents_title, "");
        assert_eq!(frame.content.unwrap().page, "install");
    }

    #[test]
    fn test_unroutable_fragment_keeps_locale() {
        let mut h = harness("#/en-US/button", SiteSettings::default());
        h.app.mount();

        for fragment in ["#/en-US/button/extra", "#", "#//input"] {
            h.location.set_fragment(fragment);
            assert_eq!(h.app.process_events(), 1, "{fragment}");
            assert_eq!(h.app.state(), &ready(Some("en-US"), "install"), "{fragment}");
            h.location.set_fragment("#/en-US/button");
            h.app.process_events();
        }

        h.location.set_fragment("#/a/b/c");
        h.app.process_events();
        let frame = h.app.frame().unwrap();
        assert_eq!(h.app.locales().locale(), Some("en-US"));
        assert_eq!(frame.side_nav.documents_title, "Development");
        assert_eq!(frame.active_link().unwrap().page, "install");
        assert_eq!(frame.active_link().unwrap().href, "#/en-US/install");
        assert_eq!(h.storage.get("ELEMENT_LANGUAGE").as_deref(), Some("en-US"));
    }

    #[test]
    fn test_page_only_fragment_clears_locale() {
        let mut h = harness("#/en-US/button", SiteSettings::default());
        h.app.mount();

        h.location.set_fragment("#/input");
        h.app.process_events();

        assert_eq!(h.app.state(), &ready(None, "input"));
        assert_eq!(h.app.locales().locale(), None);
        assert_eq!(h.storage.get("ELEMENT_LANGUAGE").as_deref(), Some("en-US"));
    }

    #[test]
    fn test_custom_fallback_page_and_storage_key() {
        let settings = SiteSettings {
            fallback_page: "button".to_owned(),
            storage_key: "LANG".to_owned(),
            ..SiteSettings::default()
        };
        let mut h = harness("#zh-CN", settings);
        h.app.mount();

        assert_eq!(h.app.state(), &ready(Some("zh-CN"), "button"));
        assert_eq!(h.storage.get("LANG").as_deref(), Some("zh-CN"));
        assert!(h.storage.get("ELEMENT_LANGUAGE").is_none());
    }

    #[test]
    fn test_set_locale_keeps_page() {
        let mut h = harness("#/zh-CN/input", SiteSettings::default());
        h.app.mount();

        h.app.set_locale("en-US");
        assert_eq!(h.location.fragment(), "#/en-US/input");
        assert_eq!(h.app.process_events(), 1);
        assert_eq!(h.app.state(), &ready(Some("en-US"), "input"));

        let html = h.app.render_html().unwrap();
        assert!(html.contains("<a href=\"#/zh-CN/input\">中文</a>"));
    }

    #[test]
    fn test_unknown_page_renders_empty_content() {
        let mut h = harness("#/en-US/nonexistent", SiteSettings::default());
        h.app.mount();

        assert_eq!(h.app.state(), &ready(Some("en-US"), "nonexistent"));
        let frame = h.app.frame().unwrap();
        assert!(frame.content.is_none());
        assert!(frame.active_link().is_none());
    }

    #[test]
    fn test_unmount_releases_subscription() {
        let mut h = harness("#/zh-CN/button", SiteSettings::default());
        h.app.mount();
        h.app.unmount();

        assert!(!h.app.is_mounted());
        assert_eq!(h.app.state(), &ViewState::Uninitialized);
        assert_eq!(h.location.subscriber_count(), 0);

        h.location.set_fragment("#/en-US/input");
        assert_eq!(h.app.process_events(), 0);
        assert_eq!(h.app.state(), &ViewState::Uninitialized);
    }

    #[test]
    fn test_remount_resolves_latest_fragment() {
        let mut h = harness("#/zh-CN/button", SiteSettings::default());
        h.app.mount();
        h.app.mount();
        assert_eq!(h.location.subscriber_count(), 1);

        h.app.unmount();
        h.location.set_fragment("#/en-US/input");
        h.app.mount();

        assert_eq!(h.location.subscriber_count(), 1);
        assert_eq!(h.app.state(), &ready(Some("en-US"), "input"));
    }

    #[test]
    fn test_demo_labels_follow_locale() {
        let mut h = harness("#/zh-CN/button", SiteSettings::default());
        h.app.mount();
        assert!(h.app.render_html().unwrap().contains(">显示代码</div>"));

        h.app.set_locale("en-US");
        h.app.process_events();
        assert!(h.app.render_html().unwrap().contains(">Expand</div>"));
    }

    static_assertions::assert_impl_all!(App: Send);
}
