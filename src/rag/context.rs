//! Context retrieval for RAG answers.

use crate::embedding::Embedder;
use crate::error::Result;
use crate::indexer::TranscriptIndex;
use crate::vector_store::SearchResult;
use std::sync::Arc;
use tracing::debug;

/// Number of chunks retrieved when not configured otherwise.
pub const DEFAULT_TOP_K: usize = 4;

/// Retrieves the chunks most similar to a query.
pub struct ContextBuilder {
    embedder: Arc<dyn Embedder>,
    top_k: usize,
}

impl ContextBuilder {
    /// Create a new context builder.
    pub fn new(embedder: Arc<dyn Embedder>) -> Self {
        Self {
            embedder,
            top_k: DEFAULT_TOP_K,
        }
    }

    /// Set the number of chunks to retrieve.
    pub fn with_top_k(mut self, top_k: usize) -> Self {
        self.top_k = top_k;
        self
    }

    /// Embed the query and fetch the nearest chunks from the index.
    pub async fn retrieve(&self, index: &TranscriptIndex, query: &str) -> Result<Vec<SearchResult>> {
        let query_embedding = self.embedder.embed(query).await?;
        let results = index.search(&query_embedding, self.top_k).await?;

        debug!(
            "Retrieved {} of {} chunks (scores: {:?})",
            results.len(),
            index.chunk_count(),
            results.iter().map(|r| r.score).collect::<Vec<_>>()
        );

        Ok(results)
    }
}

/// Place every retrieved chunk verbatim into one context block.
pub fn format_context_for_prompt(results: &[SearchResult]) -> String {
    results
        .iter()
        .map(|r| r.document.content())
        .collect::<Vec<_>>()
        .join("\n\n")
}
