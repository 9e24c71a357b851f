use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

static VIDEO_ID_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?:youtube\.com/(?:[^/\n\s]+/\S+/|(?:v|e(?:mbed)?)/|\S*?[?&]v=)|youtu\.be/)([a-zA-Z0-9_-]{11})",
    )
    .expect("valid youtube regex")
});

/// Extract the 11-character video id from any of the common YouTube URL shapes
/// (`watch?v=`, `youtu.be/`, `embed/`, `v/`).
pub fn video_id(url: &str) -> Option<&str> {
    VIDEO_ID_RE
        .captures(url)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

pub fn embed_url(id: &str) -> String {
    format!("https://www.youtube.com/embed/{id}")
}

pub fn thumbnail_url(id: &str) -> String {
    format!("https://img.youtube.com/vi/{id}/mqdefault.jpg")
}

/// Derived links exposed next to a stored video.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VideoLinks {
    pub youtube_id: String,
    pub embed_url: String,
    pub thumbnail_url: String,
}

impl VideoLinks {
    pub fn from_url(url: &str) -> Option<Self> {
        let id = video_id(url)?;
        Some(Self {
            youtube_id: id.to_string(),
            embed_url: embed_url(id),
            thumbnail_url: thumbnail_url(id),
        })
    }
}
