//! vidask - Ask questions about YouTube videos
//!
//! Answers natural-language questions about a single YouTube video from its
//! captions. Each request fetches the best caption track, translates it to
//! English when needed, indexes it in memory and answers with
//! retrieval-augmented generation.
//!
//! # Architecture
//!
//! The library is organized into several modules:
//!
//! - `config` - Configuration and prompt templates
//! - `video_id` - Video ID extraction from URLs
//! - `captions` - Caption service abstraction (YouTube)
//! - `transcript` - Track selection and transcript retrieval
//! - `translation` - Translation to English
//! - `chunking` - Transcript chunking
//! - `embedding` - Embedding generation
//! - `generation` - Chat model abstraction
//! - `vector_store` - In-memory vector search
//! - `indexer` - Per-request transcript index
//! - `rag` - RAG engine for question answering
//! - `orchestrator` - Pipeline coordination and error classification
//!
//! # Example
//!
//! ```rust,no_run
//! use vidask::config::Settings;
//! use vidask::orchestrator::Orchestrator;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let settings = Settings::load()?;
//!     let orchestrator = Orchestrator::new(&settings)?;
//!
//!     let answer = orchestrator
//!         .handle_query("https://youtu.be/dQw4w9WgXcQ", "What is the song about?")
//!         .await?;
//!     println!("{}", answer);
//!
//!     Ok(())
//! }
//! ```

pub mod captions;
pub mod chunking;
pub mod cli;
pub mod config;
pub mod embedding;
pub mod error;
pub mod generation;
pub mod indexer;
pub mod openai;
pub mod orchestrator;
pub mod rag;
pub mod transcript;
pub mod translation;
pub mod vector_store;
pub mod video_id;

#[cfg(test)]
pub(crate) mod test_support;

pub use error::{Result, VidaskError};
