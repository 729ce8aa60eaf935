use crate::models::feed::FeedItem;
use crate::services::loader::LoadOutcome;
use crate::services::renderer::MAX_POSTS;
use crate::services::theme::Theme;
use crate::utils::text::{format_date, truncate};
use colored::Colorize;
use prettytable::{format, Cell, Row, Table};

pub struct DisplayFormatter;

impl DisplayFormatter {
    pub fn new() -> Self {
        Self
    }

    pub fn format_header(&self, text: &str) -> String {
        format!("\n=== {} ===", text.bright_white().bold())
    }

    /// The posts a feed container shows, as a terminal table.
    pub fn format_posts_table(&self, posts: &[FeedItem]) -> String {
        let mut table = Table::new();
        table.set_format(*format::consts::FORMAT_NO_BORDER_LINE_SEPARATOR);

        table.add_row(Row::new(
            ["Date", "Title", "Link"]
                .iter()
                .map(|h| Cell::new(h).style_spec("b"))
                .collect(),
        ));

        for post in posts.iter().take(MAX_POSTS) {
            table.add_row(Row::new(vec![
                Cell::new(&format_date(post.pub_date())),
                Cell::new(&truncate(post.title().trim(), 60, None)),
                Cell::new(post.link()),
            ]));
        }

        table.to_string()
    }

    pub fn format_outcome(&self, feed_key: &str, outcome: &LoadOutcome) -> String {
        match outcome {
            LoadOutcome::Rendered { posts } => {
                format!("{:<10} {}", feed_key, format!("{} post(s)", posts).green())
            }
            LoadOutcome::Fallback { reason } => {
                format!("{:<10} {}", feed_key, format!("fallback: {}", reason).red())
            }
        }
    }

    pub fn format_theme(&self, theme: Theme) -> String {
        match theme {
            Theme::Dark => "dark".bright_white().on_black().to_string(),
            Theme::Light => "light".black().on_white().to_string(),
        }
    }
}

impl Default for DisplayFormatter {
    fn default() -> Self {
        Self::new()
    }
}
