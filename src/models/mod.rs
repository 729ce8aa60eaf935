pub mod cache;
pub mod feed;
pub mod page;
pub mod storage;
pub mod ui_state;
