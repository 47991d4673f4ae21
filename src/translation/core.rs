/*!
 * Core translation service implementation.
 *
 * `Translator` turns one `(text, source, target)` triple into a prompt,
 * sends it to the model client and returns the trimmed completion. It holds
 * no state besides a borrowed client, performs no validation and never
 * retries: whatever the client reports is what the caller gets.
 */

use log::debug;

use crate::errors::TranslationError;
use crate::language_utils::SupportedLanguage;
use crate::providers::Provider;
use super::prompts::build_translation_prompt;

/// One translation to perform
#[derive(Debug, Clone, PartialEq)]
pub struct TranslationRequest {
    /// Text to translate, non-empty after trimming
    pub text: String,
    /// Language of the text
    pub source_language: SupportedLanguage,
    /// Language to translate into
    pub target_language: SupportedLanguage,
}

impl TranslationRequest {
    /// Build a request, or `None` when the text is blank
    pub fn new(text: impl Into<String>, source_language: SupportedLanguage, target_language: SupportedLanguage) -> Option<Self> {
        let text = text.into();
        if text.trim().is_empty() {
            return None;
        }
        Some(Self { text, source_language, target_language })
    }
}

/// The translated text of one request
#[derive(Debug, Clone, PartialEq)]
pub struct TranslationResult {
    pub translated_text: String,
}

/// Stateless adapter between a translation request and a model client
#[derive(Debug)]
pub struct Translator<'a, P: Provider> {
    provider: &'a P,
}

impl<P: Provider> Clone for Translator<'_, P> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<P: Provider> Copy for Translator<'_, P> {}

impl<'a, P: Provider> Translator<'a, P> {
    /// Create a translator over an already initialized client
    pub fn new(provider: &'a P) -> Self {
        Self { provider }
    }

    /// Translate `text` from `source_language` to `target_language`
    ///
    /// Language names go into the prompt verbatim; no checks are made on
    /// any argument.
    pub async fn translate(&self, text: &str, source_language: &str, target_language: &str) -> Result<String, TranslationError> {
        let prompt = build_translation_prompt(text, source_language, target_language);
        debug!(
            "Translating {} chars from {} to {} (prompt {} chars)",
            text.chars().count(), source_language, target_language, prompt.chars().count()
        );

        let request = self.provider.prompt_request(&prompt);
        let response = self.provider.complete(request).await?;

        Ok(P::extract_text(&response).trim().to_string())
    }

    /// Translate a typed request
    pub async fn translate_request(&self, request: &TranslationRequest) -> Result<TranslationResult, TranslationError> {
        let translated_text = self.translate(
            &request.text,
            request.source_language.display_name(),
            request.target_language.display_name(),
        ).await?;

        Ok(TranslationResult { translated_text })
    }
}
