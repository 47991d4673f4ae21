/*!
 * Translation of free text through a generative model.
 *
 * - `core`: the `Translator` and its request/result types
 * - `prompts`: the instruction prompt sent to the model
 */

// Re-export main types for easier usage
pub use self::core::{TranslationRequest, TranslationResult, Translator};
pub use self::prompts::{PromptTemplate, build_translation_prompt};

// Submodules
pub mod core;
pub mod prompts;
