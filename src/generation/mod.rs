//! Text generation used for translation and answer synthesis.

mod openai;

pub use openai::OpenAIGenerator;

use crate::error::Result;
use async_trait::async_trait;

/// A rendered prompt: system instructions plus the user turn.
#[derive(Debug, Clone, PartialEq)]
pub struct Prompt {
    pub system: String,
    pub user: String,
}

impl Prompt {
    pub fn new(system: impl Into<String>, user: impl Into<String>) -> Self {
        Self {
            system: system.into(),
            user: user.into(),
        }
    }
}

/// Trait for language model backends.
#[async_trait]
pub trait Generator: Send + Sync {
    /// Generate a completion for the prompt.
    ///
    /// Returns `None` when the model replied without any content.
    async fn generate(&self, prompt: &Prompt) -> Result<Option<String>>;

    /// Model identifier, for logging.
    fn model(&self) -> &str;
}
