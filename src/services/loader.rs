use crate::api::rss2json::Rss2JsonApi;
use crate::config::FeedSource;
use crate::models::feed::FeedResponse;
use crate::services::renderer::{FeedRenderer, MAX_POSTS};
use std::sync::Arc;
use tokio::task::JoinSet;
use tracing::{debug, error};

/// How one feed load ended. Either way the container shows something.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    Rendered { posts: usize },
    Fallback { reason: String },
}

/// Loads each configured newsletter independently: fetch, then render the
/// posts or the fallback card.
#[derive(Clone)]
pub struct FeedLoader {
    api: Rss2JsonApi,
    renderer: FeedRenderer,
    feeds: Arc<Vec<FeedSource>>,
}

impl FeedLoader {
    pub fn new(api: Rss2JsonApi, renderer: FeedRenderer, feeds: Vec<FeedSource>) -> Self {
        Self {
            api,
            renderer,
            feeds: Arc::new(feeds),
        }
    }

    pub fn feeds(&self) -> &[FeedSource] {
        &self.feeds
    }

    /// The live cached response for `key`, without fetching.
    pub fn cached(&self, key: &str) -> Option<FeedResponse> {
        self.api.cache().get(key)
    }

    pub async fn load(&self, feed: &FeedSource) -> LoadOutcome {
        match self.api.fetch_feed(&feed.key, &feed.url).await {
            Ok(data) => {
                let posts = data.items.len().min(MAX_POSTS);
                self.renderer
                    .render(
                        &feed.container_id,
                        &data.items,
                        &feed.accent,
                        feed.skip_marker.as_deref(),
                    )
                    .await;
                LoadOutcome::Rendered { posts }
            }
            Err(e) => {
                error!("Failed to load {} posts: {}", feed.name, e);
                self.renderer
                    .render_error(&feed.container_id, &feed.name, &feed.homepage);
                LoadOutcome::Fallback {
                    reason: e.to_string(),
                }
            }
        }
    }

    /// Load every feed in its own task and wait for all of them.
    ///
    /// Outcomes come back in completion order. A task that panics is
    /// logged and left out; the others are unaffected.
    pub async fn load_all(&self) -> Vec<(String, LoadOutcome)> {
        self.load_where(|_| true).await
    }

    /// Reload only the feeds whose cache entry is absent or expired.
    /// Used when the page becomes visible again.
    pub async fn reload_stale(&self) -> Vec<(String, LoadOutcome)> {
        let cache = self.api.cache().clone();
        self.load_where(move |feed| {
            let stale = cache.get(&feed.key).is_none();
            if !stale {
                debug!("{} still cached, not reloading", feed.key);
            }
            stale
        })
        .await
    }

    async fn load_where(
        &self,
        mut wanted: impl FnMut(&FeedSource) -> bool,
    ) -> Vec<(String, LoadOutcome)> {
        let mut tasks = JoinSet::new();
        for feed in self.feeds.iter().filter(|feed| wanted(*feed)).cloned() {
            let loader = self.clone();
            tasks.spawn(async move {
                let outcome = loader.load(&feed).await;
                (feed.key, outcome)
            });
        }

        let mut outcomes = Vec::with_capacity(tasks.len());
        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok(outcome) => outcomes.push(outcome),
                Err(e) => error!("Feed task failed: {}", e),
            }
        }
        outcomes
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::cache::FeedCache;
    use crate::models::page::Page;
    use crate::models::storage::MemoryStore;
    use crate::utils::clock::ManualClock;
    use std::time::Duration;

    fn feed(key: &str, container: &str, path: &str, server_url: &str) -> FeedSource {
        FeedSource {
            key: key.to_string(),
            url: format!("{server_url}/{path}"),
            container_id: container.to_string(),
            name: format!("{key} newsletter"),
            homepage: format!("https://{key}.example.com/"),
            accent: "#123456".to_string(),
            skip_marker: None,
        }
    }

    #[tokio::test]
    async fn test_one_failure_does_not_affect_the_other() {
        let mut server = mockito::Server::new_async().await;
        let good = format!("{}/good", server.url());
        let _ok = server
            .mock("GET", "/proxy")
            .match_query(mockito::Matcher::UrlEncoded("rss_url".into(), good))
            .with_status(200)
            .with_body(r#"{"status":"ok","items":[{"title":"A","link":"https://a","pubDate":"2026-01-09 00:00:00"}]}"#)
            .create_async()
            .await;
        let bad = format!("{}/bad", server.url());
        let _fail = server
            .mock("GET", "/proxy")
            .match_query(mockito::Matcher::UrlEncoded("rss_url".into(), bad))
            .with_status(503)
            .create_async()
            .await;

        let page = Page::skeleton().shared();
        let cache = FeedCache::new(
            Arc::new(MemoryStore::new()),
            Arc::new(ManualClock::at(0)),
            Duration::from_secs(3600),
        );
        let api = Rss2JsonApi::new(&format!("{}/proxy", server.url()), cache);
        let loader = FeedLoader::new(
            api,
            FeedRenderer::new(page.clone()),
            vec![
                feed("ff-feed", "ff-posts", "good", &server.url()),
                feed("tim-feed", "tim-posts", "bad", &server.url()),
            ],
        );

        let mut outcomes = loader.load_all().await;
        outcomes.sort_by(|a, b| a.0.cmp(&b.0));

        assert_eq!(outcomes[0], ("ff-feed".to_string(), LoadOutcome::Rendered { posts: 1 }));
        assert!(matches!(outcomes[1].1, LoadOutcome::Fallback { .. }));

        let page = page.lock().unwrap();
        assert!(page.element("ff-posts").unwrap().inner_html.contains("<article"));
        assert!(page
            .element("tim-posts")
            .unwrap()
            .inner_html
            .contains("Visit tim-feed newsletter directly"));
    }
}
