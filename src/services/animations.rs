use crate::models::page::{with_page, Element, Page, SharedPage};
use std::sync::Mutex;
use tracing::debug;

pub const FADE_IN_CLASS: &str = "fade-in";
pub const VISIBLE_CLASS: &str = "fade-in-visible";
pub const THRESHOLD: f64 = 0.1;
/// Shrinks the viewport's bottom edge so reveals fire a little early.
pub const ROOT_MARGIN_BOTTOM: f64 = -50.0;

/// One-shot reveal of `.fade-in` elements as they scroll into view.
pub struct FadeInObserver {
    page: SharedPage,
    observed: Mutex<Vec<String>>,
}

impl FadeInObserver {
    pub fn new(page: SharedPage) -> Self {
        Self {
            page,
            observed: Mutex::new(Vec::new()),
        }
    }

    /// Start watching every `.fade-in` element, then reveal whatever is
    /// already in view.
    pub fn observe_all(&self) -> Vec<String> {
        let ids = with_page(&self.page, |page| page.ids_with_class(FADE_IN_CLASS))
            .unwrap_or_default();
        debug!("Observing {} fade-in element(s)", ids.len());
        if let Ok(mut observed) = self.observed.lock() {
            *observed = ids;
        }
        self.check()
    }

    /// Reveal observed elements that now intersect the viewport enough.
    /// Revealed elements stop being observed. Returns their ids.
    pub fn check(&self) -> Vec<String> {
        let Ok(mut observed) = self.observed.lock() else {
            return Vec::new();
        };

        let revealed = with_page(&self.page, |page| {
            let hits: Vec<String> = observed
                .iter()
                .filter(|id| {
                    page.element(id)
                        .is_some_and(|el| intersection_ratio(page, el) >= THRESHOLD)
                })
                .cloned()
                .collect();
            for id in &hits {
                if let Some(el) = page.element_mut(id) {
                    el.add_class(VISIBLE_CLASS);
                }
            }
            hits
        })
        .unwrap_or_default();

        observed.retain(|id| !revealed.contains(id));
        revealed
    }

    pub fn pending(&self) -> usize {
        self.observed.lock().map_or(0, |observed| observed.len())
    }
}

/// Fraction of `el` inside the viewport shrunk by the root margin.
fn intersection_ratio(page: &Page, el: &Element) -> f64 {
    let root_top = page.scroll_y;
    let root_bottom = page.scroll_y + page.viewport_height + ROOT_MARGIN_BOTTOM;
    let top = el.offset_top;
    let bottom = el.offset_top + el.offset_height;

    if el.offset_height <= 0.0 {
        return if top >= root_top && top <= root_bottom { 1.0 } else { 0.0 };
    }

    let overlap = bottom.min(root_bottom) - top.max(root_top);
    (overlap / el.offset_height).max(0.0)
}
