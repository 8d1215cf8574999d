//! In-memory vector store implementation.

use super::{cosine_similarity, Document, SearchResult, VectorStore};
use crate::error::{Result, VidaskError};
use async_trait::async_trait;
use std::sync::RwLock;

/// In-memory vector store with brute-force cosine search.
pub struct MemoryVectorStore {
    documents: RwLock<Vec<Document>>,
}

impl MemoryVectorStore {
    /// Create a new in-memory vector store.
    pub fn new() -> Self {
        Self {
            documents: RwLock::new(Vec::new()),
        }
    }
}

impl Default for MemoryVectorStore {
    fn default() -> Self {
        Self::new()
    }
}

fn poisoned<T>(_: T) -> VidaskError {
    VidaskError::VectorStore("document lock poisoned".to_string())
}

#[async_trait]
impl VectorStore for MemoryVectorStore {
    async fn insert_batch(&self, docs: Vec<Document>) -> Result<usize> {
        let count = docs.len();
        self.documents.write().map_err(poisoned)?.extend(docs);
        Ok(count)
    }

    async fn search(&self, query_embedding: &[f32], limit: usize) -> Result<Vec<SearchResult>> {
        let docs = self.documents.read().map_err(poisoned)?;

        let mut results: Vec<SearchResult> = docs
            .iter()
            .map(|doc| SearchResult {
                score: cosine_similarity(query_embedding, &doc.embedding),
                document: doc.clone(),
            })
            .collect();

        // Highest score first; equal scores keep transcript order.
        results.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then(a.document.chunk.order.cmp(&b.document.chunk.order))
        });
        results.truncate(limit);

        Ok(results)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chunking::Chunk;
    use crate::video_id::VideoId;

    fn doc(order: usize, content: &str, embedding: Vec<f32>) -> Document {
        Document::new(
            Chunk {
                video_id: VideoId::parse("dQw4w9WgXcQ").unwrap(),
                content: content.to_string(),
                order,
                start_char: 0,
            },
            embedding,
        )
    }

    #[tokio::test]
    async fn test_memory_vector_store() {
        let store = MemoryVectorStore::new();

        let docs = vec![
            doc(0, "Hello world", vec![1.0, 0.0, 0.0]),
            doc(1, "Goodbye world", vec![0.0, 1.0, 0.0]),
            doc(2, "Hello again", vec![0.9, 0.1, 0.0]),
        ];
        assert_eq!(store.insert_batch(docs).await.unwrap(), 3);

        let results = store.search(&[1.0, 0.0, 0.0], 2).await.unwrap();
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].document.content(), "Hello world");
        assert_eq!(results[1].document.content(), "Hello again");
        assert!(results[0].score > results[1].score);
    }

    #[tokio::test]
    async fn test_equal_scores_keep_chunk_order() {
        let store = MemoryVectorStore::new();
        store
            .insert_batch(vec![
                doc(2, "third", vec![1.0, 0.0]),
                doc(0, "first", vec![1.0, 0.0]),
                doc(1, "second", vec![1.0, 0.0]),
            ])
            .await
            .unwrap();

        let results = store.search(&[1.0, 0.0], 10).await.unwrap();
        let orders: Vec<usize> = results.iter().map(|r| r.document.chunk.order).collect();
        assert_eq!(orders, vec![0, 1, 2]);
    }

    #[tokio::test]
    async fn test_insert_keeps_every_document() {
        let store = MemoryVectorStore::new();
        let chunks: Vec<Document> = (0..50)
            .map(|i| doc(i, &format!("chunk {}", i), vec![1.0, i as f32]))
            .collect();

        assert_eq!(store.insert_batch(chunks).await.unwrap(), 50);
        assert_eq!(store.insert_batch(Vec::new()).await.unwrap(), 0);

        let results = store.search(&[1.0, 0.0], 100).await.unwrap();
        assert_eq!(results.len(), 50);
        assert_eq!(results[0].document.content(), "chunk 0");
    }
}
