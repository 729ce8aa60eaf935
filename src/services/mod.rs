pub mod animations;
pub mod loader;
pub mod navigation;
pub mod renderer;
pub mod site;
pub mod theme;
