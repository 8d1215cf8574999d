//! YouTube video ID extraction.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

/// Path-style URLs: youtu.be/ID, /embed/ID, /shorts/ID, /v/ID, /live/ID.
static PATH_URL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?x)
        ^(?:https?://)?
        (?:(?:www|m|music)\.)?
        (?:
            youtu\.be/
            |
            youtube(?:-nocookie)?\.com/(?:embed|shorts|v|e|live)/
        )
        ([0-9A-Za-z_-]{11})
        (?:[^0-9A-Za-z_-]|$)
    ",
    )
    .expect("Invalid regex")
});

/// Query-style URLs: a `v` parameter anywhere in a youtube.com query string.
static QUERY_URL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?x)
        ^(?:https?://)?
        (?:(?:www|m|music)\.)?
        youtube(?:-nocookie)?\.com/[^?\#]*
        \?(?:[^\#]*&)?
        v=([0-9A-Za-z_-]{11})
        (?:[^0-9A-Za-z_-]|$)
    ",
    )
    .expect("Invalid regex")
});

static BARE_ID: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9A-Za-z_-]{11}$").expect("Invalid regex"));

/// An 11-character YouTube video identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VideoId(String);

impl VideoId {
    /// Validate a bare video ID.
    pub fn parse(id: &str) -> Option<Self> {
        let id = id.trim();
        BARE_ID.is_match(id).then(|| Self(id.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Canonical watch URL for this video.
    pub fn watch_url(&self) -> String {
        format!("https://www.youtube.com/watch?v={}", self.0)
    }
}

impl std::fmt::Display for VideoId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for VideoId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Extract the video ID from a YouTube URL.
///
/// Returns `None` when the input matches none of the known URL shapes.
pub fn extract(url: &str) -> Option<VideoId> {
    let url = url.trim();

    PATH_URL
        .captures(url)
        .or_else(|| QUERY_URL.captures(url))
        .and_then(|caps| caps.get(1))
        .map(|m| VideoId(m.as_str().to_string()))
}

/// Extract a video ID from a URL, falling back to a bare ID.
pub fn extract_or_parse(input: &str) -> Option<VideoId> {
    extract(input).or_else(|| VideoId::parse(input))
}
