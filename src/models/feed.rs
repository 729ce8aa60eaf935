use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// Body returned by the RSS-to-JSON proxy.
///
/// Only `status` is checked. Fields this crate does not read are kept in
/// `extra` so a cached response is the response, unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedResponse {
    #[serde(default)]
    pub status: String,
    #[serde(default, deserialize_with = "items_or_empty")]
    pub items: Vec<FeedItem>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl FeedResponse {
    pub fn is_ok(&self) -> bool {
        self.status == "ok"
    }
}

// A missing, null or non-list `items` reads as no posts.
fn items_or_empty<'de, D>(deserializer: D) -> Result<Vec<FeedItem>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Array(items) => items.into_iter().map(FeedItem).collect(),
        _ => Vec::new(),
    })
}

/// One post, exactly as the proxy sent it.
///
/// Accessors read string fields; a missing, null or non-string value reads
/// as empty text, so one odd item never spoils the rest of the feed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FeedItem(pub Value);

impl Default for FeedItem {
    fn default() -> Self {
        Self(Value::Object(Map::new()))
    }
}

impl FeedItem {
    pub fn new(title: &str, link: &str, pub_date: &str) -> Self {
        Self::default()
            .with("title", title)
            .with("link", link)
            .with("pubDate", pub_date)
    }

    /// Set a field; a non-object item is replaced by an object first.
    pub fn with(mut self, field: &str, value: impl Into<Value>) -> Self {
        if !self.0.is_object() {
            self.0 = Value::Object(Map::new());
        }
        if let Value::Object(fields) = &mut self.0 {
            fields.insert(field.to_string(), value.into());
        }
        self
    }

    pub fn text(&self, field: &str) -> &str {
        self.0.get(field).and_then(Value::as_str).unwrap_or("")
    }

    pub fn title(&self) -> &str {
        self.text("title")
    }

    pub fn link(&self) -> &str {
        self.text("link")
    }

    pub fn pub_date(&self) -> &str {
        self.text("pubDate")
    }

    /// Description, falling back to content, then to nothing.
    pub fn summary_source(&self) -> &str {
        match self.text("description") {
            "" => self.text("content"),
            description => description,
        }
    }
}
