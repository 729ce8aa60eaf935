//! Navigation behaviours: mobile menu, smooth in-page scrolling and the
//! nav bar shadow.

use crate::models::page::{with_page, SharedPage, NAV_ID};
use crate::models::ui_state::UiState;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::sleep;
use tracing::debug;

pub const MENU_ID: &str = "mobileMenu";
pub const MENU_TOGGLE_ID: &str = "mobileMenuToggle";
pub const MENU_ICON_ID: &str = "menuIcon";
pub const CLOSE_ICON_ID: &str = "closeIcon";
pub const MENU_LINK_CLASS: &str = "mobile-menu-link";
pub const HIDDEN_CLASS: &str = "hidden";

/// Wait before a menu link closes the menu, so the scroll handler still
/// sees it open.
pub const MENU_LINK_CLOSE_DELAY: Duration = Duration::from_millis(100);
/// Length of the menu's collapse transition.
pub const MENU_CLOSE_ANIMATION: Duration = Duration::from_millis(300);

pub const SHADOW_THRESHOLD: f64 = 100.0;
pub const NAV_SHADOW: &str = "0 2px 10px rgba(0, 0, 0, 0.05)";

#[derive(Clone)]
pub struct MobileMenu {
    page: SharedPage,
    state: Arc<UiState>,
}

impl MobileMenu {
    pub fn new(page: SharedPage, state: Arc<UiState>) -> Self {
        Self { page, state }
    }

    pub fn is_open(&self) -> bool {
        self.state.is_menu_open()
    }

    /// Open a closed menu or close an open one; returns the new state.
    pub fn toggle(&self) -> bool {
        let open = !self.state.is_menu_open();
        self.set_open(open);
        open
    }

    pub fn close(&self) {
        if self.state.is_menu_open() {
            self.set_open(false);
        }
    }

    /// Close after [`MENU_LINK_CLOSE_DELAY`]; what a menu link click does.
    pub async fn close_after_delay(&self) {
        sleep(MENU_LINK_CLOSE_DELAY).await;
        self.close();
    }

    fn set_open(&self, open: bool) {
        self.state.set_menu_open(open);
        debug!("Mobile menu {}", if open { "opened" } else { "closed" });

        with_page(&self.page, |page| {
            for (id, hidden) in [
                (MENU_ID, !open),
                (MENU_ICON_ID, open),
                (CLOSE_ICON_ID, !open),
            ] {
                if let Some(el) = page.element_mut(id) {
                    if hidden {
                        el.add_class(HIDDEN_CLASS);
                    } else {
                        el.remove_class(HIDDEN_CLASS);
                    }
                }
            }
            if let Some(button) = page.element_mut(MENU_TOGGLE_ID) {
                button
                    .attrs
                    .insert("aria-expanded".to_string(), open.to_string());
            }
        });
    }
}

#[derive(Clone)]
pub struct SmoothScroll {
    page: SharedPage,
    state: Arc<UiState>,
}

impl SmoothScroll {
    pub fn new(page: SharedPage, state: Arc<UiState>) -> Self {
        Self { page, state }
    }

    /// Handle a click on an in-page link. Scrolls so the target sits just
    /// below the nav bar and returns the offset, or `None` for `#` and
    /// unknown targets.
    ///
    /// While the mobile menu is open the scroll waits for its collapse, so
    /// the nav height is measured after the menu is gone.
    pub async fn on_anchor_click(&self, href: &str) -> Option<f64> {
        let target_id = href.strip_prefix('#')?;
        if target_id.is_empty() {
            return None;
        }

        let exists = with_page(&self.page, |page| page.element(target_id).is_some())?;
        if !exists {
            debug!("No element for anchor {}", href);
            return None;
        }

        if self.state.is_menu_open() {
            sleep(MENU_CLOSE_ANIMATION).await;
        }

        with_page(&self.page, |page| {
            let target = page.element(target_id)?.offset_top;
            let top = target - page.nav_height();
            page.scroll_to(top, true);
            Some(page.scroll_y)
        })
        .flatten()
    }
}

/// Drop shadow under the nav bar once the page is scrolled past
/// [`SHADOW_THRESHOLD`]. Runs on every scroll event.
#[derive(Clone)]
pub struct NavShadow {
    page: SharedPage,
}

impl NavShadow {
    pub fn new(page: SharedPage) -> Self {
        Self { page }
    }

    pub fn on_scroll(&self) {
        with_page(&self.page, |page| {
            let shadow = if page.scroll_y > SHADOW_THRESHOLD {
                NAV_SHADOW
            } else {
                "none"
            };
            if let Some(nav) = page.element_mut(NAV_ID) {
                nav.set_style("box-shadow", shadow);
            }
        });
    }
}
