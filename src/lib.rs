pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod services;
pub mod utils;

// Re-export commonly used items
pub use config::{FeedSource, SiteConfig};
pub use error::{FetchError, StorageError};
pub use services::loader::LoadOutcome;
pub use services::site::Site;
