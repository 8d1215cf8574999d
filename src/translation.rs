//! Transcript translation to English.

use crate::config::Prompts;
use crate::error::{Result, VidaskError};
use crate::generation::{Generator, Prompt};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{info, instrument};

/// Translates transcript text to English with a language model.
pub struct Translator {
    generator: Arc<dyn Generator>,
    prompts: Prompts,
}

impl Translator {
    pub fn new(generator: Arc<dyn Generator>) -> Self {
        Self {
            generator,
            prompts: Prompts::default(),
        }
    }

    /// Set custom prompts (with user-defined variables).
    pub fn with_prompts(mut self, prompts: Prompts) -> Self {
        self.prompts = prompts;
        self
    }

    /// Build the translation prompt.
    pub fn prompt(&self, text: &str, language_name: &str, language_code: &str) -> Prompt {
        let mut vars = HashMap::new();
        vars.insert("text".to_string(), text.to_string());
        vars.insert("language".to_string(), language_name.to_string());
        vars.insert("language_code".to_string(), language_code.to_string());

        Prompt::new(
            self.prompts.render_with_custom(&self.prompts.translation.system, &vars),
            self.prompts.render_with_custom(&self.prompts.translation.user, &vars),
        )
    }

    /// Translate `text` to English.
    ///
    /// The model output is returned verbatim. A reply without content yields
    /// an empty string.
    #[instrument(skip(self, text), fields(from = %language_code, chars = text.chars().count()))]
    pub async fn translate(
        &self,
        text: &str,
        language_name: &str,
        language_code: &str,
    ) -> Result<String> {
        info!(
            "Translating transcript from {} ({}) with {}",
            language_name,
            language_code,
            self.generator.model()
        );

        let prompt = self.prompt(text, language_name, language_code);
        let output = self
            .generator
            .generate(&prompt)
            .await
            .map_err(|e| VidaskError::TranslationFailed(e.to_string()))?;

        Ok(output.unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::RecordingGenerator;

    #[tokio::test]
    async fn test_translate_returns_raw_output() {
        let generator = Arc::new(RecordingGenerator::replying("  Hello, friends.\n"));
        let translator = Translator::new(generator.clone());

        let english = translator.translate("Hola, amigos.", "Spanish", "es").await.unwrap();
        assert_eq!(english, "  Hello, friends.\n");

        let prompts = generator.prompts();
        assert_eq!(prompts.len(), 1);
        assert!(prompts[0].user.contains("from Spanish (es) to English"));
        assert!(prompts[0].user.contains("Hola, amigos."));
    }

    #[tokio::test]
    async fn test_transcript_with_braces_is_sent_verbatim() {
        let generator = Arc::new(RecordingGenerator::replying("ok"));
        let translator = Translator::new(generator.clone());
        let text = "El presentador escribe {{language}} y {{text}} en la pantalla.";

        translator.translate(text, "Spanish", "es").await.unwrap();

        let user = &generator.prompts()[0].user;
        assert!(user.ends_with(text), "prompt: {}", user);
        assert!(user.contains("from Spanish (es)"));
    }

    #[tokio::test]
    async fn test_translate_without_content_is_empty() {
        let translator = Translator::new(Arc::new(RecordingGenerator::silent()));
        let english = translator.translate("Hola", "Spanish", "es").await.unwrap();
        assert!(english.is_empty());
    }

    #[tokio::test]
    async fn test_translate_failure_is_typed() {
        let translator = Translator::new(Arc::new(RecordingGenerator::failing("quota exceeded")));
        let result = translator.translate("Hola", "Spanish", "es").await;

        match result {
            Err(VidaskError::TranslationFailed(msg)) => assert!(msg.contains("quota exceeded")),
            other => panic!("unexpected result: {:?}", other),
        }
    }
}
