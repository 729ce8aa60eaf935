use crate::models::page::{with_page, SharedPage, ROOT_ID};
use crate::models::storage::KeyValueStore;
use std::sync::Arc;
use tracing::{debug, error};

pub const THEME_KEY: &str = "theme";
pub const DARK_CLASS: &str = "dark";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Theme {
    Dark,
    Light,
}

impl Theme {
    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Dark => "dark",
            Theme::Light => "light",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "dark" => Some(Theme::Dark),
            "light" => Some(Theme::Light),
            _ => None,
        }
    }

    fn from_dark(dark: bool) -> Self {
        if dark {
            Theme::Dark
        } else {
            Theme::Light
        }
    }
}

/// Dark/light theme on the root element, with an explicit choice persisted
/// and the system preference as the fallback.
pub struct ThemeController {
    page: SharedPage,
    store: Arc<dyn KeyValueStore>,
}

impl ThemeController {
    pub fn new(page: SharedPage, store: Arc<dyn KeyValueStore>) -> Self {
        Self { page, store }
    }

    /// The explicitly chosen theme, if any. Any non-empty stored value is a
    /// choice; only `"dark"` reads as dark. Unreadable storage counts as no
    /// choice.
    pub fn stored_preference(&self) -> Option<Theme> {
        match self.store.get_item(THEME_KEY) {
            Ok(Some(value)) if !value.is_empty() => {
                Some(Theme::parse(&value).unwrap_or(Theme::Light))
            }
            Ok(_) => None,
            Err(e) => {
                error!("Error reading theme preference: {}", e);
                None
            }
        }
    }

    pub fn init(&self, system_prefers_dark: bool) -> Theme {
        let theme = self
            .stored_preference()
            .unwrap_or(Theme::from_dark(system_prefers_dark));
        debug!("Initial theme: {}", theme.as_str());
        self.apply(theme);
        theme
    }

    /// Flip the theme and remember the choice.
    pub fn toggle(&self) -> Theme {
        let dark = with_page(&self.page, |page| {
            page.element_mut(ROOT_ID)
                .map(|root| root.toggle_class(DARK_CLASS))
        })
        .flatten()
        .unwrap_or(false);

        let theme = Theme::from_dark(dark);
        if let Err(e) = self.store.set_item(THEME_KEY, theme.as_str()) {
            error!("Error saving theme preference: {}", e);
        }
        theme
    }

    /// Follow a system preference change unless the user has chosen.
    pub fn on_system_change(&self, prefers_dark: bool) {
        if self.stored_preference().is_some() {
            debug!("Ignoring system theme change; explicit preference stored");
            return;
        }
        self.apply(Theme::from_dark(prefers_dark));
    }

    pub fn current(&self) -> Theme {
        let dark = with_page(&self.page, |page| {
            page.element(ROOT_ID).is_some_and(|root| root.has_class(DARK_CLASS))
        })
        .unwrap_or(false);
        Theme::from_dark(dark)
    }

    fn apply(&self, theme: Theme) {
        with_page(&self.page, |page| {
            if let Some(root) = page.element_mut(ROOT_ID) {
                match theme {
                    Theme::Dark => root.add_class(DARK_CLASS),
                    Theme::Light => root.remove_class(DARK_CLASS),
                }
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::page::Page;
    use crate::models::storage::MemoryStore;

    fn controller(store: Arc<MemoryStore>) -> ThemeController {
        ThemeController::new(Page::skeleton().shared(), store)
    }

    #[test]
    fn test_init_follows_system_without_preference() {
        let store = Arc::new(MemoryStore::new());
        assert_eq!(controller(store.clone()).init(true), Theme::Dark);
        assert_eq!(controller(store).init(false), Theme::Light);
    }

    #[test]
    fn test_toggle_persists_and_survives_reinit() {
        let store = Arc::new(MemoryStore::new());
        let theme = controller(store.clone());
        theme.init(false);
        assert_eq!(theme.toggle(), Theme::Dark);
        assert_eq!(store.get_item(THEME_KEY).unwrap().as_deref(), Some("dark"));

        // a fresh page with the opposite system preference
        let reloaded = controller(store.clone());
        assert_eq!(reloaded.init(false), Theme::Dark);
        assert_eq!(reloaded.toggle(), Theme::Light);
        assert_eq!(controller(store).init(true), Theme::Light);
    }

    #[test]
    fn test_system_change_only_applies_without_preference() {
        let store = Arc::new(MemoryStore::new());
        let theme = controller(store.clone());
        theme.init(false);
        theme.on_system_change(true);
        assert_eq!(theme.current(), Theme::Dark);
        theme.on_system_change(false);
        assert_eq!(theme.current(), Theme::Light);

        theme.toggle();
        assert_eq!(theme.current(), Theme::Dark);
        theme.on_system_change(false);
        assert_eq!(theme.current(), Theme::Dark);
    }

    #[test]
    fn test_unknown_stored_value_is_an_explicit_light_choice() {
        let store = Arc::new(MemoryStore::new());
        store.set_item(THEME_KEY, "sepia").unwrap();
        let theme = controller(store);
        assert_eq!(theme.init(true), Theme::Light);

        theme.on_system_change(true);
        assert_eq!(theme.current(), Theme::Light);
    }

    #[test]
    fn test_empty_stored_value_is_no_choice() {
        let store = Arc::new(MemoryStore::new());
        store.set_item(THEME_KEY, "").unwrap();
        let theme = controller(store);
        assert_eq!(theme.init(true), Theme::Dark);

        theme.on_system_change(false);
        assert_eq!(theme.current(), Theme::Light);
    }
}
