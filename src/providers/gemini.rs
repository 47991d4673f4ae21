use async_trait::async_trait;
use log::{debug, error};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::errors::ProviderError;
use crate::providers::{ModelCatalog, ModelInfo, Provider};

/// Default public endpoint of the Generative Language API
pub const DEFAULT_ENDPOINT: &str = "https://generativelanguage.googleapis.com";

/// Default API version path segment
pub const DEFAULT_API_VERSION: &str = "v1beta";

/// Gemini client for interacting with the Generative Language API
#[derive(Clone)]
pub struct Gemini {
    /// HTTP client for API requests
    client: Client,
    /// API key for authentication
    api_key: String,
    /// Base URL including the API version, without trailing slash
    base_url: String,
}

impl fmt::Debug for Gemini {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Gemini")
            .field("base_url", &self.base_url)
            .field("api_key", &"<redacted>")
            .finish()
    }
}

/// A Gemini client bound to one model
#[derive(Debug, Clone)]
pub struct GeminiModel {
    gemini: Gemini,
    name: String,
}

/// Content generation request
#[derive(Debug, Serialize)]
pub struct GenerateContentRequest {
    /// Conversation turns; translation always sends exactly one
    contents: Vec<Content>,
}

/// One turn of content
#[derive(Debug, Serialize, Deserialize)]
pub struct Content {
    /// Role of the author (user, model)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,

    /// Parts of the turn
    #[serde(default)]
    pub parts: Vec<Part>,
}

/// A piece of content; only text parts are used here
#[derive(Debug, Serialize, Deserialize)]
pub struct Part {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

/// Content generation response
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentResponse {
    /// Candidate completions
    #[serde(default)]
    pub candidates: Vec<Candidate>,

    /// Feedback on the prompt, set when the prompt was blocked
    #[serde(default)]
    pub prompt_feedback: Option<PromptFeedback>,

    /// Token usage information
    #[serde(default)]
    pub usage_metadata: Option<UsageMetadata>,
}

/// A candidate completion
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    #[serde(default)]
    pub content: Option<Content>,
    #[serde(default)]
    pub finish_reason: Option<String>,
}

/// Why a prompt was rejected
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PromptFeedback {
    #[serde(default)]
    pub block_reason: Option<String>,
}

/// Token usage information
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageMetadata {
    #[serde(default)]
    pub prompt_token_count: u32,
    #[serde(default)]
    pub candidates_token_count: u32,
    #[serde(default)]
    pub total_token_count: u32,
}

/// One page of the model listing
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListModelsResponse {
    #[serde(default)]
    pub models: Vec<ModelEntry>,
    #[serde(default)]
    pub next_page_token: Option<String>,
}

/// A model as reported by the listing endpoint
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelEntry {
    pub name: String,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub supported_generation_methods: Vec<String>,
}

impl From<ModelEntry> for ModelInfo {
    fn from(entry: ModelEntry) -> Self {
        Self {
            name: entry.name,
            display_name: entry.display_name,
            supported_generation_methods: entry.supported_generation_methods,
        }
    }
}

impl GenerateContentRequest {
    /// Create a single-turn user request
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            contents: vec![Content {
                role: Some("user".to_string()),
                parts: vec![Part { text: Some(prompt.into()) }],
            }],
        }
    }
}

impl Gemini {
    /// Create a new Gemini client
    ///
    /// No timeout is configured; the transport default applies.
    pub fn new(api_key: impl Into<String>, endpoint: &str, api_version: &str) -> Self {
        let endpoint = if endpoint.is_empty() { DEFAULT_ENDPOINT } else { endpoint };
        Self {
            client: Client::new(),
            api_key: api_key.into(),
            base_url: format!(
                "{}/{}",
                endpoint.trim_end_matches('/'),
                api_version.trim_matches('/')
            ),
        }
    }

    /// Bind the client to a model
    pub fn model(self, name: impl Into<String>) -> GeminiModel {
        GeminiModel {
            gemini: self,
            name: qualified_model_name(&name.into()),
        }
    }

    /// Base URL including the API version
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetch one page of the model listing
    pub async fn list_models_page(&self, page_token: Option<&str>) -> Result<ListModelsResponse, ProviderError> {
        let url = format!("{}/models", self.base_url);
        let mut request = self.client.get(&url)
            .header("x-goog-api-key", &self.api_key);
        if let Some(token) = page_token {
            request = request.query(&[("pageToken", token)]);
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await
                .unwrap_or_else(|_| "Failed to get error response text".to_string());
            error!("Gemini model listing error ({}): {}", status, error_text);
            return Err(ProviderError::from_status(status.as_u16(), error_text));
        }

        response.json::<ListModelsResponse>().await
            .map_err(|e| ProviderError::ParseError(e.to_string()))
    }

    /// Generate content with the given model
    pub async fn generate_content(&self, model: &str, request: &GenerateContentRequest) -> Result<GenerateContentResponse, ProviderError> {
        let url = format!("{}/{}:generateContent", self.base_url, qualified_model_name(model));

        let response = self.client.post(&url)
            .header("Content-Type", "application/json")
            .header("x-goog-api-key", &self.api_key)
            .json(request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await
                .unwrap_or_else(|_| "Failed to get error response text".to_string());
            error!("Gemini API error ({}): {}", status, error_text);
            return Err(ProviderError::from_status(status.as_u16(), error_text));
        }

        let gemini_response = response.json::<GenerateContentResponse>().await
            .map_err(|e| ProviderError::ParseError(e.to_string()))?;

        if let Some(usage) = &gemini_response.usage_metadata {
            debug!(
                "Token usage: prompt={} completion={} total={}",
                usage.prompt_token_count, usage.candidates_token_count, usage.total_token_count
            );
        }

        ensure_text(&gemini_response)?;
        Ok(gemini_response)
    }

    /// Extract text from a Gemini response
    ///
    /// Concatenates the text parts of the first candidate.
    pub fn extract_text_from_response(response: &GenerateContentResponse) -> String {
        response.candidates.first()
            .and_then(|candidate| candidate.content.as_ref())
            .map(|content| {
                content.parts.iter()
                    .filter_map(|part| part.text.as_deref())
                    .collect()
            })
            .unwrap_or_default()
    }
}

impl GeminiModel {
    /// Fully qualified model name, e.g. `models/gemini-1.5-flash`
    pub fn name(&self) -> &str {
        &self.name
    }
}

#[async_trait]
impl Provider for GeminiModel {
    type Request = GenerateContentRequest;
    type Response = GenerateContentResponse;

    fn prompt_request(&self, prompt: &str) -> Self::Request {
        GenerateContentRequest::new(prompt)
    }

    async fn complete(&self, request: Self::Request) -> Result<Self::Response, ProviderError> {
        self.gemini.generate_content(&self.name, &request).await
    }

    fn extract_text(response: &Self::Response) -> String {
        Gemini::extract_text_from_response(response)
    }
}

#[async_trait]
impl ModelCatalog for Gemini {
    async fn list_models(&self) -> Result<Vec<ModelInfo>, ProviderError> {
        let mut models = Vec::new();
        let mut page_token: Option<String> = None;

        loop {
            let page = self.list_models_page(page_token.as_deref()).await?;
            models.extend(page.models.into_iter().map(ModelInfo::from));

            match page.next_page_token {
                Some(token) if !token.is_empty() => page_token = Some(token),
                _ => break,
            }
        }

        debug!("Listed {} models", models.len());
        Ok(models)
    }
}

/// Prefix a bare model id with `models/`
pub fn qualified_model_name(name: &str) -> String {
    let name = name.trim().trim_start_matches('/');
    if name.starts_with("models/") || name.starts_with("tunedModels/") {
        name.to_string()
    } else {
        format!("models/{}", name)
    }
}

/// A response with no text at all is an empty completion
fn ensure_text(response: &GenerateContentResponse) -> Result<(), ProviderError> {
    let has_text = response.candidates.first()
        .and_then(|candidate| candidate.content.as_ref())
        .is_some_and(|content| content.parts.iter().any(|part| part.text.is_some()));
    if has_text {
        return Ok(());
    }

    let reason = response.prompt_feedback.as_ref()
        .and_then(|feedback| feedback.block_reason.clone())
        .map(|reason| format!("prompt blocked ({})", reason))
        .or_else(|| {
            response.candidates.first()
                .and_then(|candidate| candidate.finish_reason.clone())
                .map(|reason| format!("finish reason {}", reason))
        })
        .unwrap_or_else(|| "no candidates returned".to_string());

    Err(ProviderError::EmptyCompletion(reason))
}
