//! Builds the per-request vector index over a transcript.

use crate::chunking::RecursiveSplitter;
use crate::embedding::Embedder;
use crate::error::{Result, VidaskError};
use crate::transcript::Transcript;
use crate::video_id::VideoId;
use crate::vector_store::{Document, MemoryVectorStore, SearchResult, VectorStore};
use std::sync::Arc;
use tracing::{debug, info, instrument};

/// Vector index over one transcript. Lives only as long as the request.
pub struct TranscriptIndex {
    video_id: VideoId,
    store: MemoryVectorStore,
    chunk_count: usize,
}

impl TranscriptIndex {
    pub fn video_id(&self) -> &VideoId {
        &self.video_id
    }

    /// Number of indexed chunks (never zero).
    pub fn chunk_count(&self) -> usize {
        self.chunk_count
    }

    /// Nearest chunks to a query embedding.
    pub async fn search(&self, query_embedding: &[f32], limit: usize) -> Result<Vec<SearchResult>> {
        self.store.search(query_embedding, limit).await
    }
}

/// Splits transcripts and embeds the chunks.
pub struct Indexer {
    embedder: Arc<dyn Embedder>,
    splitter: RecursiveSplitter,
}

impl Indexer {
    pub fn new(embedder: Arc<dyn Embedder>, splitter: RecursiveSplitter) -> Self {
        Self { embedder, splitter }
    }

    /// Chunk, embed and index a transcript.
    ///
    /// Blank text is rejected before splitting, so no embedding call is made.
    #[instrument(skip(self, transcript), fields(video_id = %video_id))]
    pub async fn build(&self, transcript: &Transcript, video_id: &VideoId) -> Result<TranscriptIndex> {
        if transcript.is_blank() {
            return Err(VidaskError::EmptyTranscript(video_id.to_string()));
        }

        let chunks = self.splitter.split(&transcript.text, video_id);
        info!("Indexing {} chunks", chunks.len());

        let texts: Vec<String> = chunks.iter().map(|c| c.content.clone()).collect();
        let embeddings = self.embedder.embed_batch(&texts).await?;

        if embeddings.len() != chunks.len() {
            return Err(VidaskError::Embedding(format!(
                "Expected {} embeddings, got {}",
                chunks.len(),
                embeddings.len()
            )));
        }

        let documents: Vec<Document> = chunks
            .into_iter()
            .zip(embeddings)
            .map(|(chunk, embedding)| Document::new(chunk, embedding))
            .collect();

        let store = MemoryVectorStore::new();
        let chunk_count = store.insert_batch(documents).await?;
        debug!("Index holds {} documents", chunk_count);

        Ok(TranscriptIndex {
            video_id: video_id.clone(),
            store,
            chunk_count,
        })
    }
}
