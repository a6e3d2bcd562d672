// SPDX-FileCopyrightText: 2026 Aide Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Text-generation trait.

use async_trait::async_trait;

use crate::error::AideError;
use crate::traits::collaborator::Collaborator;

const TRANSLATOR_PROMPT: &str = "You are a professional translator.";

/// A chat-completion style text generator.
#[async_trait]
pub trait TextGenerator: Collaborator {
    /// Generates a completion for one system prompt and one user prompt.
    async fn generate(&self, system_prompt: &str, user_prompt: &str) -> Result<String, AideError>;

    /// Translates `text` into `target_language`.
    ///
    /// The default implementation prompts [`TextGenerator::generate`].
    async fn translate(&self, text: &str, target_language: &str) -> Result<String, AideError> {
        let prompt = format!("Translate the following email to {target_language}:\n\n{text}");
        let translated = self.generate(TRANSLATOR_PROMPT, &prompt).await?;
        Ok(translated.trim().to_string())
    }
}
