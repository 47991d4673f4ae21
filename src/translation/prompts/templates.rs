/*!
 * Prompt template for text translation.
 *
 * The rendered instruction is the whole wire contract with the model, so it
 * is kept as one literal template.
 */

/// Instruction prompt template for translation.
#[derive(Debug, Clone)]
pub struct PromptTemplate {
    /// The template string with placeholders
    template: String,
}

impl PromptTemplate {
    /// The default translation instruction.
    pub const TRANSLATOR: &'static str = "Translate the following text from {source_language} to {target_language}.
Return ONLY the translated text.

Text:
{text}";

    /// Create a new prompt template.
    pub fn new(template: &str) -> Self {
        Self {
            template: template.to_string(),
        }
    }

    /// Create the default translator template.
    pub fn translator() -> Self {
        Self::new(Self::TRANSLATOR)
    }

    /// Render the template with the given variables.
    ///
    /// Languages are substituted before the text, so placeholder-like
    /// sequences inside the user's text are left alone.
    pub fn render(&self, source_language: &str, target_language: &str, text: &str) -> String {
        let head = self.template
            .replace("{source_language}", source_language)
            .replace("{target_language}", target_language);
        match head.split_once("{text}") {
            Some((before, after)) => format!("{}{}{}", before, text, after),
            None => head,
        }
    }
}

impl Default for PromptTemplate {
    fn default() -> Self {
        Self::translator()
    }
}

/// Build the prompt for one translation request
pub fn build_translation_prompt(text: &str, source_language: &str, target_language: &str) -> String {
    PromptTemplate::translator().render(source_language, target_language, text)
}
