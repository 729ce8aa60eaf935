use crate::error::FetchError;
use crate::models::cache::FeedCache;
use crate::models::feed::FeedResponse;
use reqwest::Client;
use tracing::{debug, error, info};

/// Fetches RSS feeds as JSON through the rss2json proxy, with a
/// session cache in front.
#[derive(Clone)]
pub struct Rss2JsonApi {
    client: Client,
    proxy_url: String,
    cache: FeedCache,
}

impl Rss2JsonApi {
    pub fn new(proxy_url: &str, cache: FeedCache) -> Self {
        Self {
            client: Client::new(),
            proxy_url: proxy_url.to_string(),
            cache,
        }
    }

    pub fn cache(&self) -> &FeedCache {
        &self.cache
    }

    /// The proxy request for a feed: the real URL goes in `rss_url`.
    pub fn proxy_request_url(&self, feed_url: &str) -> String {
        format!(
            "{}?rss_url={}",
            self.proxy_url,
            urlencoding::encode(feed_url)
        )
    }

    /// Return the cached response for `key`, or fetch `feed_url` once
    /// through the proxy and cache it.
    ///
    /// No retry and no timeout. A failed cache write is logged and the
    /// fetched response is still returned.
    pub async fn fetch_feed(&self, key: &str, feed_url: &str) -> Result<FeedResponse, FetchError> {
        if let Some(cached) = self.cache.get(key) {
            info!("Using cached data for {}", key);
            return Ok(cached);
        }

        debug!("Cache miss for {}", key);
        match self.request(feed_url).await {
            Ok(data) => {
                if let Err(e) = self.cache.put(key, &data) {
                    error!("Error writing cache for {}: {}", key, e);
                }
                Ok(data)
            }
            Err(e) => {
                error!("Error fetching {} feed: {}", key, e);
                Err(e)
            }
        }
    }

    async fn request(&self, feed_url: &str) -> Result<FeedResponse, FetchError> {
        let url = self.proxy_request_url(feed_url);
        debug!("Sending request to {}", url);

        let response = self.client.get(&url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Http {
                status: status.as_u16(),
            });
        }

        let body = response.text().await?;
        let data: FeedResponse =
            serde_json::from_str(&body).map_err(|e| FetchError::Decode(e.to_string()))?;

        if !data.is_ok() {
            return Err(FetchError::Rejected {
                status: data.status,
            });
        }

        debug!("Parsed {} items from {}", data.items.len(), feed_url);
        Ok(data)
    }
}
