//! Request orchestrator for vidask.
//!
//! Drives one question through the whole pipeline: extract the video ID,
//! pick and fetch a caption track, translate it to English when needed,
//! index it and answer from the retrieved context. Nothing is kept between
//! requests.

use crate::captions::{CaptionTrack, CaptionsService, YoutubeCaptions};
use crate::chunking::{ChunkingConfig, RecursiveSplitter};
use crate::config::{Prompts, Settings};
use crate::embedding::{Embedder, OpenAIEmbedder};
use crate::error::{Result, VidaskError};
use crate::generation::{Generator, OpenAIGenerator};
use crate::indexer::Indexer;
use crate::rag::RagEngine;
use crate::transcript::{select_track, TranscriptFetcher};
use crate::translation::Translator;
use crate::video_id::{self, VideoId};
use std::fmt;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, error, info, instrument, warn};

/// Pipeline position of a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Start,
    IdExtracted,
    TranscriptSelected,
    TranscriptFetched,
    Translated,
    Indexed,
    Answered,
    Done,
    Errored,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Start => "start",
            Stage::IdExtracted => "id_extracted",
            Stage::TranscriptSelected => "transcript_selected",
            Stage::TranscriptFetched => "transcript_fetched",
            Stage::Translated => "translated",
            Stage::Indexed => "indexed",
            Stage::Answered => "answered",
            Stage::Done => "done",
            Stage::Errored => "errored",
        };
        f.write_str(name)
    }
}

/// Failure category reported to callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorClass {
    /// The request itself is malformed.
    BadInput,
    /// The video or a usable transcript does not exist.
    NotFound,
    /// Anything else went wrong.
    Internal,
}

impl ErrorClass {
    /// HTTP status code for this class.
    pub fn status_code(&self) -> u16 {
        match self {
            ErrorClass::BadInput => 400,
            ErrorClass::NotFound => 404,
            ErrorClass::Internal => 500,
        }
    }

    /// Categorize a pipeline error.
    pub fn of(error: &VidaskError) -> Self {
        match error {
            VidaskError::InvalidInput(_) => ErrorClass::BadInput,
            VidaskError::NoTranscript(_)
            | VidaskError::TranscriptsDisabled(_)
            | VidaskError::VideoUnavailable(_)
            | VidaskError::TranscriptUnavailable(_)
            | VidaskError::EmptyTranscript(_) => ErrorClass::NotFound,
            _ => ErrorClass::Internal,
        }
    }
}

/// A failed query, classified for the caller.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct QueryError {
    pub class: ErrorClass,
    pub message: String,
}

impl From<VidaskError> for QueryError {
    fn from(error: VidaskError) -> Self {
        Self {
            class: ErrorClass::of(&error),
            message: error.to_string(),
        }
    }
}

/// The main orchestrator for the vidask pipeline.
pub struct Orchestrator {
    captions: Arc<dyn CaptionsService>,
    fetcher: TranscriptFetcher,
    translator: Translator,
    indexer: Indexer,
    rag: RagEngine,
}

impl Orchestrator {
    /// Build an orchestrator talking to YouTube and OpenAI.
    pub fn new(settings: &Settings) -> Result<Self> {
        let prompts = Prompts::load(
            settings.prompts.custom_dir.as_deref(),
            Some(&settings.prompts.variables),
        )?;
        let timeout = settings.request_timeout();

        let captions: Arc<dyn CaptionsService> = Arc::new(YoutubeCaptions::new(settings)?);
        let embedder: Arc<dyn Embedder> = Arc::new(OpenAIEmbedder::with_config(
            &settings.embedding.model,
            settings.embedding.dimensions as usize,
            timeout,
        )?);
        let translation_generator: Arc<dyn Generator> = Arc::new(OpenAIGenerator::new(
            &settings.translation.model,
            settings.translation.temperature,
            timeout,
        )?);
        let answer_generator: Arc<dyn Generator> = Arc::new(OpenAIGenerator::new(
            &settings.rag.model,
            settings.rag.temperature,
            timeout,
        )?);

        info!(
            "Using {} for translation, {} for answers, {} for embeddings",
            settings.translation.model, settings.rag.model, settings.embedding.model
        );

        Self::with_components(
            captions,
            embedder,
            translation_generator,
            answer_generator,
            ChunkingConfig::from(&settings.chunking),
            settings.rag.top_k,
            prompts,
        )
    }

    /// Create an orchestrator with custom components.
    pub fn with_components(
        captions: Arc<dyn CaptionsService>,
        embedder: Arc<dyn Embedder>,
        translation_generator: Arc<dyn Generator>,
        answer_generator: Arc<dyn Generator>,
        chunking: ChunkingConfig,
        top_k: usize,
        prompts: Prompts,
    ) -> Result<Self> {
        if top_k == 0 {
            return Err(VidaskError::Config("rag.top_k must be greater than 0".to_string()));
        }
        let splitter = RecursiveSplitter::new(chunking)?;

        Ok(Self {
            fetcher: TranscriptFetcher::new(captions.clone()),
            translator: Translator::new(translation_generator).with_prompts(prompts.clone()),
            indexer: Indexer::new(embedder.clone(), splitter),
            rag: RagEngine::new(embedder, answer_generator, top_k).with_prompts(prompts),
            captions,
        })
    }

    /// Answer `query` about the video at `youtube_url`.
    #[instrument(skip(self, query), fields(url = %youtube_url))]
    pub async fn handle_query(&self, youtube_url: &str, query: &str) -> std::result::Result<String, QueryError> {
        let mut stage = Stage::Start;

        match self.run(youtube_url, query, &mut stage).await {
            Ok(answer) => Ok(answer),
            Err(e) => {
                let failure = QueryError::from(e);
                let failed_at = std::mem::replace(&mut stage, Stage::Errored);
                match failure.class {
                    ErrorClass::Internal => error!("{} -> {}: {}", failed_at, stage, failure.message),
                    _ => warn!("{} -> {}: {}", failed_at, stage, failure.message),
                }
                Err(failure)
            }
        }
    }

    async fn run(&self, youtube_url: &str, query: &str, stage: &mut Stage) -> Result<String> {
        if youtube_url.trim().is_empty() || query.trim().is_empty() {
            return Err(VidaskError::InvalidInput(
                "youtube_url and query are required".to_string(),
            ));
        }

        let video_id = video_id::extract(youtube_url.trim()).ok_or_else(|| {
            VidaskError::InvalidInput(format!("Could not extract a video ID from {}", youtube_url))
        })?;
        advance(stage, Stage::IdExtracted, &video_id);

        let tracks = self.captions.list_tracks(&video_id).await?;
        let track = select_track(&tracks)
            .ok_or_else(|| VidaskError::NoTranscript(video_id.to_string()))?;
        debug!(
            "Selected {} {} track out of {}",
            track.language_code,
            track.kind(),
            tracks.len()
        );
        advance(stage, Stage::TranscriptSelected, &video_id);

        let mut transcript = self.fetcher.fetch(&video_id, track).await?;
        if transcript.is_blank() {
            return Err(VidaskError::EmptyTranscript(video_id.to_string()));
        }
        advance(stage, Stage::TranscriptFetched, &video_id);

        if !transcript.is_english() {
            let english = self
                .translator
                .translate(&transcript.text, &transcript.language_name, &transcript.language_code)
                .await?;
            transcript = transcript.translated(english);
            if transcript.is_blank() {
                return Err(VidaskError::EmptyTranscript(video_id.to_string()));
            }
            advance(stage, Stage::Translated, &video_id);
        }

        let index = self.indexer.build(&transcript, &video_id).await?;
        advance(stage, Stage::Indexed, &video_id);

        let answer = self.rag.answer(&index, query).await?;
        advance(stage, Stage::Answered, &video_id);
        advance(stage, Stage::Done, &video_id);

        Ok(answer)
    }

    /// List the caption tracks of a video and the position of the one a
    /// query would use.
    ///
    /// Accepts a bare video ID as well as a URL.
    #[instrument(skip(self))]
    pub async fn list_tracks(&self, input: &str) -> Result<(Vec<CaptionTrack>, Option<usize>)> {
        let video_id = video_id::extract_or_parse(input.trim()).ok_or_else(|| {
            VidaskError::InvalidInput(format!("Could not extract a video ID from {}", input))
        })?;

        let tracks = self.captions.list_tracks(&video_id).await?;
        let selected = select_track(&tracks)
            .and_then(|chosen| tracks.iter().position(|t| std::ptr::eq(t, chosen)));

        Ok((tracks, selected))
    }
}

fn advance(stage: &mut Stage, next: Stage, video_id: &VideoId) {
    info!(video_id = %video_id, "{} -> {}", stage, next);
    *stage = next;
}
