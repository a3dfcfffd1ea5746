use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Number of content characters used for a generated excerpt.
pub const EXCERPT_CHARS: usize = 150;

/// A published blog post. Posts are never edited; they are created or deleted.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BlogPost {
    pub id: String,
    pub title: String,
    pub content: String,
    pub excerpt: String,
    pub date: DateTime<Utc>,
    /// Attachment references, kept in upload order and otherwise opaque.
    #[serde(default)]
    pub files: Vec<serde_json::Value>,
}

/// Default excerpt: the first [`EXCERPT_CHARS`] characters of the raw content
/// followed by an ellipsis, trimmed.
pub fn default_excerpt(content: &str) -> String {
    let head: String = content.chars().take(EXCERPT_CHARS).collect();
    format!("{head}...").trim().to_string()
}

/// Singleton blog settings.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlogConfig {
    /// Hex sha256 of `password + salt`.
    pub password: String,
    #[serde(rename = "lastUpdated")]
    pub last_updated: DateTime<Utc>,
}

/// Partial update merged into the stored [`BlogConfig`].
#[derive(Clone, Debug, Default)]
pub struct BlogConfigUpdate {
    pub password: Option<String>,
}
