use std::sync::atomic::{AtomicBool, Ordering};

/// The one piece of state the UI behaviours share: whether the mobile menu
/// is open. Written by the menu, read by smooth scrolling.
#[derive(Debug, Default)]
pub struct UiState {
    menu_open: AtomicBool,
}

impl UiState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_menu_open(&self) -> bool {
        self.menu_open.load(Ordering::SeqCst)
    }

    pub fn set_menu_open(&self, open: bool) {
        self.menu_open.store(open, Ordering::SeqCst);
    }
}
