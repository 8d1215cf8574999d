//! Transcript selection and retrieval.
//!
//! Picks one caption track per video and flattens its cues into a single
//! text blob.

use crate::captions::{CaptionTrack, CaptionsService};
use crate::error::Result;
use crate::video_id::VideoId;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, instrument};

/// Language code the pipeline answers in.
pub const ENGLISH: &str = "en";

/// Pick the best caption track.
///
/// English beats every other language, and within the same language
/// preference a manually authored track beats a generated one. Remaining
/// ties keep the service's order. Returns `None` only for an empty list.
pub fn select_track(tracks: &[CaptionTrack]) -> Option<&CaptionTrack> {
    tracks
        .iter()
        .enumerate()
        .min_by_key(|(index, track)| (track.language_code != ENGLISH, track.is_generated, *index))
        .map(|(_, track)| track)
}

/// Flattened text of one caption track.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transcript {
    /// Video the transcript belongs to.
    pub video_id: VideoId,
    /// Language code of `text`.
    pub language_code: String,
    /// Display name of the language.
    pub language_name: String,
    /// Cue texts joined by single spaces.
    pub text: String,
}

impl Transcript {
    /// Build a transcript from a selected track and its text.
    pub fn new(video_id: VideoId, track: &CaptionTrack, text: String) -> Self {
        Self {
            video_id,
            language_code: track.language_code.clone(),
            language_name: track.language_name.clone(),
            text,
        }
    }

    /// Whether the text is already English.
    pub fn is_english(&self) -> bool {
        self.language_code == ENGLISH
    }

    /// Whether there is no usable text.
    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }

    /// Produce the English transcript that replaces this one after translation.
    pub fn translated(&self, english_text: String) -> Self {
        Self {
            video_id: self.video_id.clone(),
            language_code: ENGLISH.to_string(),
            language_name: "English".to_string(),
            text: english_text,
        }
    }
}

/// Retrieves and flattens the cues of a caption track.
pub struct TranscriptFetcher {
    captions: Arc<dyn CaptionsService>,
}

impl TranscriptFetcher {
    pub fn new(captions: Arc<dyn CaptionsService>) -> Self {
        Self { captions }
    }

    /// Fetch the cues of `track` and join them in order with single spaces.
    #[instrument(skip(self, track), fields(video_id = %video_id, language = %track.language_code))]
    pub async fn fetch(&self, video_id: &VideoId, track: &CaptionTrack) -> Result<Transcript> {
        let cues = self.captions.fetch_cues(track).await?;

        let text = cues
            .iter()
            .map(|cue| cue.text.as_str())
            .collect::<Vec<_>>()
            .join(" ");

        debug!("Flattened {} cues into {} characters", cues.len(), text.chars().count());

        Ok(Transcript::new(video_id.clone(), track, text))
    }
}
