use std::env;
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_PROXY_URL: &str = "https://api.rss2json.com/v1/api.json";
pub const DEFAULT_CACHE_TTL_SECS: u64 = 3600;
pub const DEFAULT_THEME_STORE_PATH: &str = ".newsletter-site/theme.json";

/// One newsletter shown on the page.
#[derive(Debug, Clone, PartialEq)]
pub struct FeedSource {
    /// Cache key, e.g. `ff-feed`.
    pub key: String,
    /// The real RSS URL, passed through the proxy.
    pub url: String,
    /// Id of the container the posts are rendered into.
    pub container_id: String,
    pub name: String,
    /// Linked from the fallback card when the feed cannot be loaded.
    pub homepage: String,
    /// Colour of the "Read More" link.
    pub accent: String,
    /// Text before this marker (case-insensitive) is dropped from descriptions.
    pub skip_marker: Option<String>,
}

impl FeedSource {
    pub fn fantasy_futbol() -> Self {
        Self {
            key: "ff-feed".to_string(),
            url: "https://fantasyfutbol.substack.com/feed".to_string(),
            container_id: "ff-posts".to_string(),
            name: "Fantasy Futbol".to_string(),
            homepage: "https://fantasyfutbol.substack.com/".to_string(),
            accent: "#39FF14".to_string(),
            skip_marker: None,
        }
    }

    pub fn today_in_menswear() -> Self {
        Self {
            key: "tim-feed".to_string(),
            url: "https://rss.beehiiv.com/feeds/wWbdOQdMnB.xml".to_string(),
            container_id: "tim-posts".to_string(),
            name: "Today in Menswear".to_string(),
            homepage: "https://www.todayinmenswear.com/".to_string(),
            accent: "#2C2C2C".to_string(),
            skip_marker: None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct SiteConfig {
    pub proxy_url: String,
    pub cache_ttl: Duration,
    /// Backing file for the persistent theme preference (binary only).
    pub theme_store_path: PathBuf,
    pub feeds: Vec<FeedSource>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            proxy_url: DEFAULT_PROXY_URL.to_string(),
            cache_ttl: Duration::from_secs(DEFAULT_CACHE_TTL_SECS),
            theme_store_path: PathBuf::from(DEFAULT_THEME_STORE_PATH),
            feeds: vec![FeedSource::fantasy_futbol(), FeedSource::today_in_menswear()],
        }
    }
}

impl SiteConfig {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let defaults = Self::default();
        Self {
            proxy_url: env::var("FEED_PROXY_URL").unwrap_or(defaults.proxy_url),
            cache_ttl: env::var("FEED_CACHE_TTL_SECS")
                .ok()
                .and_then(|secs| secs.parse().ok())
                .map(Duration::from_secs)
                .unwrap_or(defaults.cache_ttl),
            theme_store_path: env::var("THEME_STORE_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.theme_store_path),
            feeds: defaults.feeds,
        }
    }
}
