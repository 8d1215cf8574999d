//! In-process fakes for the external services, shared by unit tests.

use crate::captions::{CaptionCue, CaptionTrack, CaptionsService};
use crate::embedding::Embedder;
use crate::error::{Result, VidaskError};
use crate::generation::{Generator, Prompt};
use crate::video_id::VideoId;
use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

/// Caption service that serves a fixed set of tracks.
pub struct ScriptedCaptions {
    tracks: Vec<(CaptionTrack, Vec<String>)>,
    list_error: Option<fn(String) -> VidaskError>,
    removed_cues: bool,
    fetched: Mutex<Vec<CaptionTrack>>,
}

impl ScriptedCaptions {
    pub fn new(tracks: Vec<(CaptionTrack, Vec<&str>)>) -> Self {
        Self {
            tracks: tracks
                .into_iter()
                .map(|(track, cues)| (track, cues.into_iter().map(String::from).collect()))
                .collect(),
            list_error: None,
            removed_cues: false,
            fetched: Mutex::new(Vec::new()),
        }
    }

    /// Fail track listing with the given error kind.
    pub fn with_list_error(mut self, error: fn(String) -> VidaskError) -> Self {
        self.list_error = Some(error);
        self
    }

    /// Tracks are listed but their cues can no longer be fetched.
    pub fn with_removed_cues(mut self) -> Self {
        self.removed_cues = true;
        self
    }

    /// Tracks whose cues were requested, in call order.
    pub fn fetched(&self) -> Vec<CaptionTrack> {
        self.fetched.lock().unwrap().clone()
    }
}

#[async_trait]
impl CaptionsService for ScriptedCaptions {
    async fn list_tracks(&self, video_id: &VideoId) -> Result<Vec<CaptionTrack>> {
        if let Some(error) = self.list_error {
            return Err(error(video_id.to_string()));
        }
        Ok(self.tracks.iter().map(|(track, _)| track.clone()).collect())
    }

    async fn fetch_cues(&self, track: &CaptionTrack) -> Result<Vec<CaptionCue>> {
        self.fetched.lock().unwrap().push(track.clone());

        if self.removed_cues {
            return Err(VidaskError::TranscriptUnavailable(track.language_code.clone()));
        }

        let (_, cues) = self
            .tracks
            .iter()
            .find(|(t, _)| t.language_code == track.language_code && t.is_generated == track.is_generated)
            .ok_or_else(|| VidaskError::TranscriptUnavailable(track.language_code.clone()))?;

        Ok(cues
            .iter()
            .enumerate()
            .map(|(i, text)| CaptionCue::new(text.clone(), i as f64, 1.0))
            .collect())
    }
}

/// Embedder with one dimension per keyword, counting words that contain it.
///
/// A constant trailing component keeps every vector non-zero, so texts with
/// no keywords are all equally similar to each other.
#[derive(Default)]
pub struct KeywordEmbedder {
    vocabulary: Vec<String>,
    failing: bool,
    calls: AtomicUsize,
    embedded_texts: AtomicUsize,
}

impl KeywordEmbedder {
    pub fn new(vocabulary: &[&str]) -> Self {
        Self {
            vocabulary: vocabulary.iter().map(|w| w.to_lowercase()).collect(),
            ..Self::default()
        }
    }

    /// Embedder whose every call fails.
    pub fn failing() -> Self {
        Self {
            failing: true,
            ..Self::default()
        }
    }

    /// Number of `embed` and `embed_batch` calls.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Number of texts embedded through `embed_batch`.
    pub fn embedded_texts(&self) -> usize {
        self.embedded_texts.load(Ordering::SeqCst)
    }

    fn vector(&self, text: &str) -> Vec<f32> {
        let words: Vec<String> = text.split_whitespace().map(|w| w.to_lowercase()).collect();
        let mut vector: Vec<f32> = self
            .vocabulary
            .iter()
            .map(|keyword| words.iter().filter(|w| w.contains(keyword.as_str())).count() as f32)
            .collect();
        vector.push(0.01);
        vector
    }

    fn check(&self) -> Result<()> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.failing {
            return Err(VidaskError::Embedding("embedding service unreachable".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl Embedder for KeywordEmbedder {
    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        self.check()?;
        Ok(self.vector(text))
    }

    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        self.check()?;
        self.embedded_texts.fetch_add(texts.len(), Ordering::SeqCst);
        Ok(texts.iter().map(|t| self.vector(t)).collect())
    }

    fn dimensions(&self) -> usize {
        self.vocabulary.len() + 1
    }
}

enum Reply {
    Text(String),
    Silent,
    Fail(String),
}

/// Generator with a canned reply that records every prompt it receives.
pub struct RecordingGenerator {
    reply: Reply,
    prompts: Mutex<Vec<Prompt>>,
}

impl RecordingGenerator {
    fn with_reply(reply: Reply) -> Self {
        Self {
            reply,
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn replying(text: &str) -> Self {
        Self::with_reply(Reply::Text(text.to_string()))
    }

    /// Replies without any content.
    pub fn silent() -> Self {
        Self::with_reply(Reply::Silent)
    }

    pub fn failing(message: &str) -> Self {
        Self::with_reply(Reply::Fail(message.to_string()))
    }

    pub fn prompts(&self) -> Vec<Prompt> {
        self.prompts.lock().unwrap().clone()
    }

    pub fn calls(&self) -> usize {
        self.prompts.lock().unwrap().len()
    }
}

#[async_trait]
impl Generator for RecordingGenerator {
    async fn generate(&self, prompt: &Prompt) -> Result<Option<String>> {
        self.prompts.lock().unwrap().push(prompt.clone());
        match &self.reply {
            Reply::Text(text) => Ok(Some(text.clone())),
            Reply::Silent => Ok(None),
            Reply::Fail(message) => Err(VidaskError::Generation(message.clone())),
        }
    }

    fn model(&self) -> &str {
        "recording"
    }
}
