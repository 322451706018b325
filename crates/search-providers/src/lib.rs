mod youtube;

use serde::{Deserialize, Serialize};
use std::ops::Deref;

pub use youtube::*;

#[derive(Debug, Clone, PartialEq)]
pub struct SearchResult {
    pub video_id: VideoId,
    pub title: String,
    pub view_count: u64,
    pub duration_seconds: u64,
    /// Relative publish time as displayed, e.g. "3 weeks ago". Missing for
    /// some uploads.
    pub published_time_text: Option<String>,
}

impl SearchResult {
    pub fn watch_url(&self) -> String {
        self.video_id.watch_url()
    }
}

pub type SearchResults = Vec<SearchResult>;

#[derive(Eq, PartialEq, Clone, Hash, Debug, Serialize, Deserialize)]
pub struct VideoId(pub(crate) String);

impl VideoId {
    pub fn watch_url(&self) -> String {
        format!("https://www.youtube.com/watch?v={}", self.0)
    }
}

impl From<&str> for VideoId {
    fn from(value: &str) -> Self {
        VideoId(value.to_string())
    }
}

impl Deref for VideoId {
    type Target = str;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl std::fmt::Display for VideoId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
