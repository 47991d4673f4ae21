/*!
 * Prompt construction for translation requests.
 */

pub mod templates;

// Re-export main types
pub use templates::{PromptTemplate, build_translation_prompt};
