/*!
 * Model client implementations.
 *
 * This module contains the client for the hosted generative-language API
 * and a mock client for tests:
 * - Gemini: Google Generative Language API
 * - Mock: in-process stand-in with scripted behaviour
 */

use async_trait::async_trait;
use std::fmt::Debug;

use crate::errors::ProviderError;

/// Common trait for all model clients
///
/// The translator only ever sends a single-turn text prompt, so every
/// provider knows how to wrap one into its own request type.
#[async_trait]
pub trait Provider: Send + Sync + Debug {
    /// The request type for this provider
    type Request: Send + Sync;

    /// The response type for this provider
    type Response: Send + Sync;

    /// Build a single-turn request carrying the given prompt
    fn prompt_request(&self, prompt: &str) -> Self::Request;

    /// Complete a request using this provider
    ///
    /// # Arguments
    /// * `request` - The request to complete
    ///
    /// # Returns
    /// * `Result<Self::Response, ProviderError>` - The response from the provider or an error
    async fn complete(&self, request: Self::Request) -> Result<Self::Response, ProviderError>;

    /// Extract text from the provider response
    fn extract_text(response: &Self::Response) -> String;
}

/// A model available behind an API key
#[derive(Debug, Clone, PartialEq)]
pub struct ModelInfo {
    /// Resource name, e.g. `models/gemini-1.5-flash`
    pub name: String,
    /// Human readable name
    pub display_name: Option<String>,
    /// Methods the model accepts, e.g. `generateContent`
    pub supported_generation_methods: Vec<String>,
}

impl ModelInfo {
    /// Whether the model can answer `generateContent` calls
    pub fn supports_generation(&self) -> bool {
        self.supported_generation_methods
            .iter()
            .any(|method| method == GENERATE_CONTENT)
    }
}

/// Generation method a model must advertise to be usable for translation
pub const GENERATE_CONTENT: &str = "generateContent";

/// Source of the model listing used at startup
#[async_trait]
pub trait ModelCatalog: Send + Sync {
    /// List every model, in the order the service reports them
    async fn list_models(&self) -> Result<Vec<ModelInfo>, ProviderError>;
}

pub mod gemini;
pub mod mock;
