/*!
 * Mock provider implementation for testing.
 *
 * This module provides a mock model client that simulates different behaviors:
 * - `MockProvider::replying(text)` - Always answers with the same text
 * - `MockProvider::echo()` - Answers with a marked copy of the prompt
 * - `MockProvider::failing()` - Always fails with an error
 * - `MockProvider::empty()` - Answers with an empty completion
 *
 * Clones share the request counter and the recorded prompt, so a test can
 * hand a clone to the code under test and inspect the original afterwards.
 */

use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use crate::errors::ProviderError;
use crate::providers::{ModelCatalog, ModelInfo, Provider};

/// Mock request for testing
#[derive(Debug, Clone)]
pub struct MockRequest {
    /// The full prompt sent to the model
    pub prompt: String,
}

/// Mock response for testing
#[derive(Debug, Clone)]
pub struct MockResponse {
    /// The completion text
    pub text: String,
}

/// Behavior mode for the mock provider
#[derive(Debug, Clone, PartialEq)]
pub enum MockBehavior {
    /// Always answers with the given text
    Reply(String),
    /// Answers with `[ECHO] <prompt>`
    Echo,
    /// Fails on every Nth request, echoes otherwise
    Intermittent { fail_every: usize },
    /// Always fails with an error
    Failing,
    /// Returns an empty completion
    Empty,
}

/// Mock provider for testing translation behavior
#[derive(Debug, Clone)]
pub struct MockProvider {
    /// Behavior mode
    behavior: MockBehavior,
    /// Number of completions requested so far
    request_count: Arc<AtomicUsize>,
    /// Prompt of the most recent request
    last_prompt: Arc<Mutex<Option<String>>>,
    /// Models reported by the catalog
    models: Vec<ModelInfo>,
    /// Whether listing the models fails
    listing_fails: bool,
}

impl MockProvider {
    /// Create a new mock provider with the specified behavior
    pub fn new(behavior: MockBehavior) -> Self {
        Self {
            behavior,
            request_count: Arc::new(AtomicUsize::new(0)),
            last_prompt: Arc::new(Mutex::new(None)),
            models: Vec::new(),
            listing_fails: false,
        }
    }

    /// Create a mock that always answers with `text`
    pub fn replying(text: impl Into<String>) -> Self {
        Self::new(MockBehavior::Reply(text.into()))
    }

    /// Create a mock that echoes the prompt back
    pub fn echo() -> Self {
        Self::new(MockBehavior::Echo)
    }

    /// Create an intermittently failing mock provider
    pub fn intermittent(fail_every: usize) -> Self {
        Self::new(MockBehavior::Intermittent { fail_every })
    }

    /// Create a failing mock provider that always errors
    pub fn failing() -> Self {
        Self::new(MockBehavior::Failing)
    }

    /// Create a mock that returns empty responses
    pub fn empty() -> Self {
        Self::new(MockBehavior::Empty)
    }

    /// Set the models reported by the catalog
    pub fn with_models(mut self, models: Vec<ModelInfo>) -> Self {
        self.models = models;
        self
    }

    /// Make model listing fail
    pub fn with_failing_listing(mut self) -> Self {
        self.listing_fails = true;
        self
    }

    /// Number of completions requested so far, across clones
    pub fn request_count(&self) -> usize {
        self.request_count.load(Ordering::SeqCst)
    }

    /// Prompt of the most recent completion request
    pub fn last_prompt(&self) -> Option<String> {
        self.last_prompt.lock().ok().and_then(|prompt| prompt.clone())
    }

    /// Convenience constructor for catalog entries
    pub fn model_info(name: &str, methods: &[&str]) -> ModelInfo {
        ModelInfo {
            name: name.to_string(),
            display_name: None,
            supported_generation_methods: methods.iter().map(|m| m.to_string()).collect(),
        }
    }
}

#[async_trait]
impl Provider for MockProvider {
    type Request = MockRequest;
    type Response = MockResponse;

    fn prompt_request(&self, prompt: &str) -> Self::Request {
        MockRequest { prompt: prompt.to_string() }
    }

    async fn complete(&self, request: Self::Request) -> Result<Self::Response, ProviderError> {
        let count = self.request_count.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut last) = self.last_prompt.lock() {
            *last = Some(request.prompt.clone());
        }

        match &self.behavior {
            MockBehavior::Reply(text) => Ok(MockResponse { text: text.clone() }),

            MockBehavior::Echo => Ok(MockResponse {
                text: format!("[ECHO] {}", request.prompt),
            }),

            MockBehavior::Intermittent { fail_every } => {
                if *fail_every > 0 && count % fail_every == fail_every - 1 {
                    Err(ProviderError::ApiError {
                        message: format!("Simulated intermittent failure (request #{})", count + 1),
                        status_code: 503,
                    })
                } else {
                    Ok(MockResponse {
                        text: format!("[ECHO] {}", request.prompt),
                    })
                }
            }

            MockBehavior::Failing => Err(ProviderError::ApiError {
                message: "Simulated provider failure".to_string(),
                status_code: 500,
            }),

            MockBehavior::Empty => Ok(MockResponse { text: String::new() }),
        }
    }

    fn extract_text(response: &Self::Response) -> String {
        response.text.clone()
    }
}

#[async_trait]
impl ModelCatalog for MockProvider {
    async fn list_models(&self) -> Result<Vec<ModelInfo>, ProviderError> {
        if self.listing_fails {
            return Err(ProviderError::AuthenticationError("API key not valid".to_string()));
        }
        Ok(self.models.clone())
    }
}
