//! RAG (Retrieval-Augmented Generation) for answering questions about a video.
//!
//! Retrieves the transcript chunks closest to the question and asks the
//! answer model to respond from that context alone.

pub mod context;
mod response;

pub use context::{format_context_for_prompt, ContextBuilder, DEFAULT_TOP_K};
pub use response::{RagEngine, NO_ANSWER};
