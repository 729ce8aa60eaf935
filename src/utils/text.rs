use chrono::{DateTime, NaiveDate, NaiveDateTime};
use regex::{Regex, RegexBuilder};

pub const ELLIPSIS: char = '…';
pub const INVALID_DATE: &str = "Invalid Date";

lazy_static::lazy_static! {
    // Anything tag-shaped. Not an HTML parser: `<` inside attribute values
    // or unterminated tags are stripped as far as the next `>`.
    static ref TAG_PATTERN: Regex = Regex::new(r"<[^>]*>").unwrap();
}

/// Render a publish date as e.g. "Jan 9, 2026".
///
/// Accepts the proxy's `YYYY-MM-DD HH:MM:SS`, RFC 2822 (raw RSS) and
/// RFC 3339. Anything else renders as "Invalid Date".
pub fn format_date(raw: &str) -> String {
    let raw = raw.trim();

    let date = NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S")
        .map(|dt| dt.date())
        .or_else(|_| DateTime::parse_from_rfc2822(raw).map(|dt| dt.date_naive()))
        .or_else(|_| DateTime::parse_from_rfc3339(raw).map(|dt| dt.date_naive()))
        .or_else(|_| NaiveDate::parse_from_str(raw, "%Y-%m-%d"));

    match date {
        Ok(date) => date.format("%b %-d, %Y").to_string(),
        Err(_) => INVALID_DATE.to_string(),
    }
}

/// Remove every tag-shaped sequence from `text`.
pub fn strip_tags(text: &str) -> String {
    TAG_PATTERN.replace_all(text, "").into_owned()
}

/// Strip tags, optionally skip past `skip_marker`, then cut to `max_len`
/// characters followed by an ellipsis.
///
/// The marker match is case-insensitive and only its first occurrence
/// counts; whitespace after it is dropped too. A marker that does not occur
/// is ignored. The cut is not word-aware.
pub fn truncate(text: &str, max_len: usize, skip_marker: Option<&str>) -> String {
    let clean = strip_tags(text);
    let body = match skip_marker.filter(|marker| !marker.is_empty()) {
        Some(marker) => skip_past(&clean, marker),
        None => clean.as_str(),
    };

    if body.chars().count() <= max_len {
        return body.to_string();
    }

    let mut cut: String = body.chars().take(max_len).collect();
    cut.push(ELLIPSIS);
    cut
}

fn skip_past<'a>(text: &'a str, marker: &str) -> &'a str {
    let pattern = match RegexBuilder::new(&regex::escape(marker))
        .case_insensitive(true)
        .build()
    {
        Ok(pattern) => pattern,
        Err(_) => return text,
    };

    match pattern.find(text) {
        Some(found) => text[found.end()..].trim_start(),
        None => text,
    }
}

/// Escape text for injection into element content or a quoted attribute.
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
