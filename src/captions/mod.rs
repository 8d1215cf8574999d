//! Caption track discovery and retrieval.
//!
//! Provides a trait-based interface over the service that lists and fetches
//! caption tracks for a video.

mod youtube;

pub use youtube::YoutubeCaptions;

use crate::error::Result;
use crate::video_id::VideoId;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// One available caption stream for a video.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaptionTrack {
    /// Language code (e.g. "en", "es").
    pub language_code: String,
    /// Display name of the language.
    pub language_name: String,
    /// Whether the track was generated by speech recognition.
    pub is_generated: bool,
    /// Service-specific location of the cue data.
    #[serde(default)]
    pub base_url: String,
}

impl CaptionTrack {
    /// Create a track without a fetch location.
    pub fn new(language_code: &str, language_name: &str, is_generated: bool) -> Self {
        Self {
            language_code: language_code.to_string(),
            language_name: language_name.to_string(),
            is_generated,
            base_url: String::new(),
        }
    }

    /// Human-readable kind of the track.
    pub fn kind(&self) -> &'static str {
        if self.is_generated {
            "generated"
        } else {
            "manual"
        }
    }
}

/// One timed unit of caption text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaptionCue {
    pub text: String,
    pub start_seconds: f64,
    pub duration_seconds: f64,
}

impl CaptionCue {
    pub fn new(text: impl Into<String>, start_seconds: f64, duration_seconds: f64) -> Self {
        Self {
            text: text.into(),
            start_seconds,
            duration_seconds,
        }
    }
}

/// Trait for caption providers.
#[async_trait]
pub trait CaptionsService: Send + Sync {
    /// List the caption tracks available for a video, in service order.
    async fn list_tracks(&self, video_id: &VideoId) -> Result<Vec<CaptionTrack>>;

    /// Fetch the ordered cues of one track.
    async fn fetch_cues(&self, track: &CaptionTrack) -> Result<Vec<CaptionCue>>;
}
