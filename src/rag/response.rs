//! RAG answer generation.

use super::context::{format_context_for_prompt, ContextBuilder};
use crate::config::Prompts;
use crate::embedding::Embedder;
use crate::error::{Result, VidaskError};
use crate::generation::{Generator, Prompt};
use crate::indexer::TranscriptIndex;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{info, instrument};

/// Returned when the model produces no answer text.
pub const NO_ANSWER: &str = "No answer found.";

/// RAG engine for question answering over one transcript index.
pub struct RagEngine {
    generator: Arc<dyn Generator>,
    context_builder: ContextBuilder,
    prompts: Prompts,
}

impl RagEngine {
    /// Create a new RAG engine.
    pub fn new(embedder: Arc<dyn Embedder>, generator: Arc<dyn Generator>, top_k: usize) -> Self {
        Self {
            generator,
            context_builder: ContextBuilder::new(embedder).with_top_k(top_k),
            prompts: Prompts::default(),
        }
    }

    /// Set custom prompts (with user-defined variables).
    pub fn with_prompts(mut self, prompts: Prompts) -> Self {
        self.prompts = prompts;
        self
    }

    /// Build the answer prompt from context text and the question.
    pub fn prompt(&self, context: &str, question: &str) -> Prompt {
        let mut vars = HashMap::new();
        vars.insert("context".to_string(), context.to_string());
        vars.insert("question".to_string(), question.to_string());

        Prompt::new(
            self.prompts.render_with_custom(&self.prompts.answer.system, &vars),
            self.prompts.render_with_custom(&self.prompts.answer.user, &vars),
        )
    }

    /// Answer a question from the indexed transcript.
    ///
    /// All retrieved chunks go into a single prompt and the model is called
    /// once.
    #[instrument(skip(self, index), fields(video_id = %index.video_id(), question = %question))]
    pub async fn answer(&self, index: &TranscriptIndex, question: &str) -> Result<String> {
        let results = self
            .context_builder
            .retrieve(index, question)
            .await
            .map_err(|e| VidaskError::AnswerGenerationFailed(e.to_string()))?;

        let context = format_context_for_prompt(&results);
        let prompt = self.prompt(&context, question);

        info!(
            "Generating answer from {} chunks with {}",
            results.len(),
            self.generator.model()
        );

        let answer = self
            .generator
            .generate(&prompt)
            .await
            .map_err(|e| VidaskError::AnswerGenerationFailed(e.to_string()))?;

        Ok(answer.unwrap_or_else(|| NO_ANSWER.to_string()))
    }
}
