use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Metadata for one video, as returned by a [`crate::traits::VideoSource`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VideoInfo {
    /// 11-character video ID.
    pub id: String,
    pub title: String,
    pub channel_title: String,
    pub channel_id: Option<String>,
    #[serde(default)]
    pub description: String,
    pub published_at: Option<DateTime<Utc>>,
    /// Length in seconds. `None` for upcoming streams.
    pub duration_secs: Option<u64>,
    #[serde(default)]
    pub is_live: bool,
    pub view_count: Option<u64>,
    /// Hidden when the uploader disables public like counts.
    pub like_count: Option<u64>,
    /// Hidden when comments are disabled.
    pub comment_count: Option<u64>,
    pub thumbnail_url: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl VideoInfo {
    pub fn watch_url(&self) -> String {
        format!("https://www.youtube.com/watch?v={}", self.id)
    }

    pub fn channel_url(&self) -> Option<String> {
        self.channel_id
            .as_ref()
            .map(|id| format!("https://www.youtube.com/channel/{id}"))
    }
}
