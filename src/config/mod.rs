//! Configuration module for vidask.
//!
//! Handles loading and managing application settings and prompt templates.

mod prompts;
mod settings;

pub use prompts::{AnswerPrompts, Prompts, TranslationPrompts};
pub use settings::{
    CaptionsSettings, ChunkingSettings, EmbeddingSettings, GeneralSettings, PromptSettings,
    RagSettings, ServerSettings, Settings, TranslationSettings,
};
