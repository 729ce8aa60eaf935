use crate::models::feed::FeedItem;
use crate::models::page::{with_page, Element, SharedPage};
use crate::utils::text::{escape_html, format_date, truncate};
use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, warn};

pub const MAX_POSTS: usize = 3;
pub const DESCRIPTION_LENGTH: usize = 150;
pub const FADE_DELAY: Duration = Duration::from_millis(50);
pub const FADE_TRANSITION: &str = "opacity 0.5s ease-in";

pub const NO_POSTS_HTML: &str = r#"
        <div class="col-span-full text-center text-warm-gray">
            No posts available at the moment.
        </div>
    "#;

/// Builds post cards and writes them into the page's feed containers.
#[derive(Clone)]
pub struct FeedRenderer {
    page: SharedPage,
}

impl FeedRenderer {
    pub fn new(page: SharedPage) -> Self {
        Self { page }
    }

    pub fn post_card(&self, post: &FeedItem, accent: &str, skip_marker: Option<&str>) -> String {
        let title = escape_html(post.title().trim());
        let link = escape_html(post.link());
        let pub_date = format_date(post.pub_date());
        // Already tag-free; entities in feed text are left for the browser.
        let description = truncate(post.summary_source(), DESCRIPTION_LENGTH, skip_marker);

        format!(
            r#"
        <article class="post-card bg-ivory dark:bg-charcoal border border-charcoal/10 dark:border-ivory/10 rounded-lg p-6 transition-all duration-300 hover:shadow-lg hover:-translate-y-1">
            <h4 class="font-semibold text-lg mb-2 leading-tight">
                <a href="{link}" target="_blank" rel="noopener noreferrer" class="hover:opacity-70 transition-opacity">
                    {title}
                </a>
            </h4>
            <time class="text-sm text-warm-gray mb-3 block">{pub_date}</time>
            <p class="text-sm text-warm-gray mb-4 leading-relaxed">{description}</p>
            <a href="{link}" target="_blank" rel="noopener noreferrer" class="text-sm font-medium inline-flex items-center gap-1 hover:opacity-70 transition-opacity" style="color: {accent}">
                Read More →
            </a>
        </article>
    "#
        )
    }

    /// Show the first three posts in `container_id`, then fade the
    /// container in. An empty list shows the "no posts" notice instead.
    pub async fn render(
        &self,
        container_id: &str,
        posts: &[FeedItem],
        accent: &str,
        skip_marker: Option<&str>,
    ) {
        if posts.is_empty() {
            self.set_container(container_id, |container| {
                container.inner_html = NO_POSTS_HTML.to_string();
            });
            return;
        }

        let html: String = posts
            .iter()
            .take(MAX_POSTS)
            .map(|post| self.post_card(post, accent, skip_marker))
            .collect();
        debug!(
            "Rendering {} post(s) into #{}",
            posts.len().min(MAX_POSTS),
            container_id
        );

        let found = self.set_container(container_id, |container| {
            container.set_style("opacity", "0");
            container.inner_html = html;
        });
        if !found {
            return;
        }

        sleep(FADE_DELAY).await;
        self.set_container(container_id, |container| {
            container.set_style("transition", FADE_TRANSITION);
            container.set_style("opacity", "1");
        });
    }

    /// Replace the container with a notice linking to the newsletter itself.
    pub fn render_error(&self, container_id: &str, name: &str, homepage: &str) {
        let html = format!(
            r#"
        <div class="col-span-full text-center text-warm-gray">
            Unable to load posts.
            <a href="{}" target="_blank" rel="noopener noreferrer" class="underline hover:opacity-70 transition-opacity">
                Visit {} directly
            </a>
        </div>
    "#,
            escape_html(homepage),
            escape_html(name)
        );
        self.set_container(container_id, |container| container.inner_html = html);
    }

    fn set_container(
        &self,
        container_id: &str,
        update: impl FnOnce(&mut Element),
    ) -> bool {
        let updated = with_page(&self.page, |page| match page.element_mut(container_id) {
            Some(container) => {
                update(container);
                true
            }
            None => false,
        });

        match updated {
            Some(true) => true,
            Some(false) => {
                warn!("Container #{} not found", container_id);
                false
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::page::Page;

    fn posts(n: usize) -> Vec<FeedItem> {
        (1..=n)
            .map(|i| {
                FeedItem::new(
                    &format!("Post {i}"),
                    &format!("https://example.com/p/{i}"),
                    &format!("2026-01-0{i} 09:00:00"),
                )
                .with("description", format!("<p>Body of post {i}</p>"))
            })
            .collect()
    }

    fn container(page: &SharedPage, id: &str) -> Element {
        page.lock().unwrap().element(id).unwrap().clone()
    }

    #[tokio::test]
    async fn test_render_takes_first_three_in_order_and_fades_in() {
        let page = Page::skeleton().shared();
        let renderer = FeedRenderer::new(page.clone());

        renderer.render("ff-posts", &posts(5), "#39FF14", None).await;

        let ff = container(&page, "ff-posts");
        assert_eq!(ff.inner_html.matches("<article").count(), 3);
        let first = ff.inner_html.find("Post 1").unwrap();
        let third = ff.inner_html.find("Post 3").unwrap();
        assert!(first < third);
        assert!(!ff.inner_html.contains("Post 4"));
        assert!(ff.inner_html.contains("Jan 1, 2026"));
        assert!(ff.inner_html.contains("Body of post 2"));
        assert!(ff.inner_html.contains("color: #39FF14"));
        assert_eq!(ff.style("opacity"), Some("1"));
        assert_eq!(ff.style("transition"), Some(FADE_TRANSITION));
    }

    #[tokio::test]
    async fn test_render_empty_shows_notice() {
        let page = Page::skeleton().shared();
        FeedRenderer::new(page.clone())
            .render("tim-posts", &[], "#2C2C2C", None)
            .await;
        assert!(container(&page, "tim-posts")
            .inner_html
            .contains("No posts available at the moment."));
    }

    #[tokio::test]
    async fn test_render_into_missing_container_is_noop() {
        let page = Page::skeleton().shared();
        FeedRenderer::new(page.clone())
            .render("nowhere", &posts(1), "#000", None)
            .await;
        assert!(page.lock().unwrap().element("nowhere").is_none());
    }

    #[test]
    fn test_post_card_escapes_and_applies_marker() {
        let page = Page::skeleton().shared();
        let renderer = FeedRenderer::new(page);
        let post = FeedItem::new("Kits & <Boots>", "https://example.com/p?a=1&b=2", "not a date")
            .with("content", "Ad copy. Read online  Actual intro");
        let card = renderer.post_card(&post, "#2C2C2C", Some("READ ONLINE"));
        assert!(card.contains("Kits &amp; &lt;Boots&gt;"));
        assert!(card.contains("https://example.com/p?a=1&amp;b=2"));
        assert!(card.contains("Invalid Date"));
        assert!(card.contains(">Actual intro</p>"));
        assert!(!card.contains("Ad copy"));
    }

    #[test]
    fn test_render_error_links_to_homepage() {
        let page = Page::skeleton().shared();
        FeedRenderer::new(page.clone()).render_error(
            "ff-posts",
            "Fantasy Futbol",
            "https://fantasyfutbol.substack.com/",
        );
        let html = container(&page, "ff-posts").inner_html;
        assert!(html.contains("Unable to load posts."));
        assert!(html.contains(r#"href="https://fantasyfutbol.substack.com/""#));
        assert!(html.contains("Visit Fantasy Futbol directly"));
    }
}
