/*!
 * # TransLingua - AI Powered Language Translator
 *
 * A Rust library and terminal front-end that translates text between a fixed
 * set of languages using a hosted generative model (Google Gemini).
 *
 * ## Features
 *
 * - Single-call translation with a fixed instruction prompt
 * - Automatic selection of the first generation-capable model
 * - Interactive session and one-shot command line mode
 * - Mock model client for tests
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `app_config`: Configuration management
 * - `translation`: Prompt construction and the `Translator`
 * - `app_controller`: Interactive and one-shot front-end
 * - `language_utils`: The supported-language set
 * - `model_discovery`: Startup model selection
 * - `providers`: Model clients:
 *   - `providers::gemini`: Generative Language API client
 *   - `providers::mock`: Scripted client for tests
 * - `errors`: Custom error types for the application
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
// These lints will be allowed but not auto-fixed
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::redundant_closure_for_method_calls)]

// Public modules
pub mod app_config;
pub mod translation;
pub mod app_controller;
pub mod language_utils;
pub mod model_discovery;
pub mod providers;
pub mod errors;

// Re-export main types for easier usage
pub use app_config::Config;
pub use app_controller::Controller;
pub use translation::{Translator, TranslationRequest, TranslationResult};
pub use language_utils::SupportedLanguage;
pub use errors::{ProviderError, StartupError, TranslationError};
