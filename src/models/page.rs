//! Headless model of the document and viewport the site scripts act on.
//!
//! Elements carry only what the behaviours read or write: classes, inline
//! styles, attributes, inner markup and vertical layout.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::{Arc, Mutex};
use tracing::error;

pub const ROOT_ID: &str = "html";
pub const NAV_ID: &str = "nav";

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Element {
    pub id: String,
    pub tag: String,
    pub classes: BTreeSet<String>,
    pub styles: BTreeMap<String, String>,
    pub attrs: BTreeMap<String, String>,
    pub inner_html: String,
    /// Distance from the top of the document, in CSS pixels.
    pub offset_top: f64,
    pub offset_height: f64,
}

impl Element {
    pub fn new(id: &str, tag: &str) -> Self {
        Self {
            id: id.to_string(),
            tag: tag.to_string(),
            ..Self::default()
        }
    }

    pub fn with_class(mut self, class: &str) -> Self {
        self.classes.insert(class.to_string());
        self
    }

    pub fn with_attr(mut self, name: &str, value: &str) -> Self {
        self.attrs.insert(name.to_string(), value.to_string());
        self
    }

    pub fn at(mut self, offset_top: f64, offset_height: f64) -> Self {
        self.offset_top = offset_top;
        self.offset_height = offset_height;
        self
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.contains(class)
    }

    pub fn add_class(&mut self, class: &str) {
        self.classes.insert(class.to_string());
    }

    pub fn remove_class(&mut self, class: &str) {
        self.classes.remove(class);
    }

    /// Flip `class`; returns whether it is now present.
    pub fn toggle_class(&mut self, class: &str) -> bool {
        if self.classes.remove(class) {
            false
        } else {
            self.classes.insert(class.to_string());
            true
        }
    }

    pub fn style(&self, property: &str) -> Option<&str> {
        self.styles.get(property).map(String::as_str)
    }

    pub fn set_style(&mut self, property: &str, value: &str) {
        self.styles.insert(property.to_string(), value.to_string());
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs.get(name).map(String::as_str)
    }
}

/// A smooth scroll the page was asked to perform.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollRequest {
    pub top: f64,
    pub smooth: bool,
}

#[derive(Debug, Clone, Default)]
pub struct Page {
    elements: Vec<Element>,
    pub scroll_y: f64,
    pub viewport_height: f64,
    pub last_scroll: Option<ScrollRequest>,
}

pub type SharedPage = Arc<Mutex<Page>>;

impl Page {
    pub fn new(viewport_height: f64) -> Self {
        Self {
            viewport_height,
            ..Self::default()
        }
    }

    /// The site's document: nav bar, mobile menu, sections and the two
    /// newsletter containers.
    pub fn skeleton() -> Self {
        let mut page = Self::new(800.0);
        let elements = vec![
            Element::new(ROOT_ID, "html").at(0.0, 2700.0),
            Element::new(NAV_ID, "nav").at(0.0, 72.0),
            Element::new("logo", "a").with_attr("href", "#"),
            Element::new("darkModeToggle", "button"),
            Element::new("mobileMenuToggle", "button"),
            Element::new("menuIcon", "svg"),
            Element::new("closeIcon", "svg").with_class("hidden"),
            Element::new("mobileMenu", "div").with_class("hidden"),
            Element::new("nav-about", "a").with_attr("href", "#about"),
            Element::new("nav-newsletters", "a").with_attr("href", "#newsletters"),
            Element::new("nav-contact", "a").with_attr("href", "#contact"),
            Element::new("mobile-about", "a")
                .with_class("mobile-menu-link")
                .with_attr("href", "#about"),
            Element::new("mobile-newsletters", "a")
                .with_class("mobile-menu-link")
                .with_attr("href", "#newsletters"),
            Element::new("mobile-contact", "a")
                .with_class("mobile-menu-link")
                .with_attr("href", "#contact"),
            Element::new("hero", "section").at(0.0, 700.0),
            Element::new("about", "section").with_class("fade-in").at(700.0, 600.0),
            Element::new("newsletters", "section")
                .with_class("fade-in")
                .at(1300.0, 900.0),
            Element::new("ff-posts", "div").at(1400.0, 300.0),
            Element::new("tim-posts", "div").at(1750.0, 300.0),
            Element::new("contact", "section")
                .with_class("fade-in")
                .at(2200.0, 500.0),
        ];
        for element in elements {
            page.insert(element);
        }
        page
    }

    pub fn shared(self) -> SharedPage {
        Arc::new(Mutex::new(self))
    }

    /// Add an element, replacing any with the same id.
    pub fn insert(&mut self, element: Element) {
        match self.elements.iter_mut().find(|e| e.id == element.id) {
            Some(existing) => *existing = element,
            None => self.elements.push(element),
        }
    }

    pub fn element(&self, id: &str) -> Option<&Element> {
        self.elements.iter().find(|e| e.id == id)
    }

    pub fn element_mut(&mut self, id: &str) -> Option<&mut Element> {
        self.elements.iter_mut().find(|e| e.id == id)
    }

    /// Ids of elements carrying `class`, in document order.
    pub fn ids_with_class(&self, class: &str) -> Vec<String> {
        self.elements
            .iter()
            .filter(|e| e.has_class(class))
            .map(|e| e.id.clone())
            .collect()
    }

    pub fn nav_height(&self) -> f64 {
        self.element(NAV_ID).map_or(0.0, |nav| nav.offset_height)
    }

    pub fn scroll_to(&mut self, top: f64, smooth: bool) {
        self.scroll_y = top.max(0.0);
        self.last_scroll = Some(ScrollRequest {
            top: self.scroll_y,
            smooth,
        });
    }
}

/// Run `f` against the shared page. A poisoned lock is logged and skipped.
pub fn with_page<R>(page: &SharedPage, f: impl FnOnce(&mut Page) -> R) -> Option<R> {
    match page.lock() {
        Ok(mut guard) => Some(f(&mut guard)),
        Err(_) => {
            error!("Page state is poisoned; skipping update");
            None
        }
    }
}
