use crate::api::rss2json::Rss2JsonApi;
use crate::config::SiteConfig;
use crate::models::cache::FeedCache;
use crate::models::page::{with_page, Page, SharedPage};
use crate::models::storage::{KeyValueStore, MemoryStore};
use crate::models::ui_state::UiState;
use crate::services::animations::FadeInObserver;
use crate::services::loader::{FeedLoader, LoadOutcome};
use crate::services::navigation::{MobileMenu, NavShadow, SmoothScroll, MENU_LINK_CLASS};
use crate::services::renderer::FeedRenderer;
use crate::services::theme::{Theme, ThemeController};
use crate::utils::clock::{Clock, SystemClock};
use std::sync::Arc;
use tracing::{debug, info};

/// The whole page's behaviour, wired to one document.
///
/// Event entry points mirror the browser events the site listens to:
/// page ready, clicks, scrolls, visibility and system theme changes.
pub struct Site {
    page: SharedPage,
    theme: ThemeController,
    menu: MobileMenu,
    scroll: SmoothScroll,
    shadow: NavShadow,
    fade_in: FadeInObserver,
    loader: FeedLoader,
}

impl Site {
    /// A site over the default document with a fresh session store.
    pub fn new(config: &SiteConfig, persistent: Arc<dyn KeyValueStore>) -> Self {
        Self::with_parts(
            config,
            Page::skeleton().shared(),
            Arc::new(MemoryStore::new()),
            persistent,
            Arc::new(SystemClock),
        )
    }

    pub fn with_parts(
        config: &SiteConfig,
        page: SharedPage,
        session: Arc<dyn KeyValueStore>,
        persistent: Arc<dyn KeyValueStore>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let state = Arc::new(UiState::new());
        let cache = FeedCache::new(session, clock, config.cache_ttl);
        let api = Rss2JsonApi::new(&config.proxy_url, cache);
        let loader = FeedLoader::new(api, FeedRenderer::new(page.clone()), config.feeds.clone());

        Self {
            theme: ThemeController::new(page.clone(), persistent),
            menu: MobileMenu::new(page.clone(), state.clone()),
            scroll: SmoothScroll::new(page.clone(), state),
            shadow: NavShadow::new(page.clone()),
            fade_in: FadeInObserver::new(page.clone()),
            loader,
            page,
        }
    }

    pub fn page(&self) -> &SharedPage {
        &self.page
    }

    pub fn loader(&self) -> &FeedLoader {
        &self.loader
    }

    pub fn theme(&self) -> &ThemeController {
        &self.theme
    }

    pub fn menu(&self) -> &MobileMenu {
        &self.menu
    }

    /// Page ready: set up the controls, then load every feed.
    pub async fn on_ready(&self, system_prefers_dark: bool) -> Vec<(String, LoadOutcome)> {
        info!("Initializing website...");
        self.theme.init(system_prefers_dark);
        self.fade_in.observe_all();
        self.shadow.on_scroll();

        let outcomes = self.loader.load_all().await;
        info!("Website initialized successfully!");
        outcomes
    }

    /// Scroll to `scroll_y`. Returns the sections this revealed.
    pub fn on_scroll(&self, scroll_y: f64) -> Vec<String> {
        with_page(&self.page, |page| page.scroll_y = scroll_y.max(0.0));
        self.shadow.on_scroll();
        self.fade_in.check()
    }

    /// Fade-in sections not yet revealed.
    pub fn unrevealed(&self) -> usize {
        self.fade_in.pending()
    }

    /// Click on the anchor element `anchor_id`. Menu links also close the
    /// menu, after a delay. Returns the scroll offset if the page scrolled.
    pub async fn click_anchor(&self, anchor_id: &str) -> Option<f64> {
        let (href, in_menu) = with_page(&self.page, |page| {
            page.element(anchor_id).map(|a| {
                (
                    a.attr("href").unwrap_or_default().to_string(),
                    a.has_class(MENU_LINK_CLASS),
                )
            })
        })
        .flatten()?;
        debug!("Anchor #{} clicked ({})", anchor_id, href);

        let top = if in_menu {
            let (_, top) = tokio::join!(
                self.menu.close_after_delay(),
                self.scroll.on_anchor_click(&href)
            );
            top
        } else {
            self.scroll.on_anchor_click(&href).await
        };

        if top.is_some() {
            self.shadow.on_scroll();
            self.fade_in.check();
        }
        top
    }

    pub fn toggle_theme(&self) -> Theme {
        self.theme.toggle()
    }

    pub fn on_system_theme_change(&self, prefers_dark: bool) {
        self.theme.on_system_change(prefers_dark);
    }

    pub fn toggle_menu(&self) -> bool {
        self.menu.toggle()
    }

    /// Visibility change. Becoming visible reloads feeds whose cache entry
    /// has gone; hiding does nothing else.
    pub async fn on_visibility_change(&self, hidden: bool) -> Vec<(String, LoadOutcome)> {
        if hidden {
            return Vec::new();
        }
        self.loader.reload_stale().await
    }
}
