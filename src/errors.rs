/*!
 * Error types for the translingua application.
 *
 * This module contains custom error types for the model client, startup
 * and translation stages, using the thiserror crate for ergonomic error
 * definitions.
 */

use thiserror::Error;

/// Errors that can occur when working with the model API
#[derive(Error, Debug)]
pub enum ProviderError {
    /// Error when making an API request fails
    #[error("API request failed: {0}")]
    RequestFailed(String),

    /// Error when parsing an API response fails
    #[error("Failed to parse API response: {0}")]
    ParseError(String),

    /// Error returned by the API itself
    #[error("API responded with error: {status_code} - {message}")]
    ApiError {
        /// HTTP status code
        status_code: u16,
        /// Error message from the API
        message: String,
    },

    /// Error establishing or maintaining a connection
    #[error("Connection error: {0}")]
    ConnectionError(String),

    /// Error related to quota or rate limiting
    #[error("Rate limit exceeded: {0}")]
    RateLimitExceeded(String),

    /// Error with authentication
    #[error("Authentication error: {0}")]
    AuthenticationError(String),

    /// The model answered without any text
    #[error("Model returned an empty completion: {0}")]
    EmptyCompletion(String),
}

impl ProviderError {
    /// Classify a non-success HTTP status and its body
    pub fn from_status(status_code: u16, message: impl Into<String>) -> Self {
        let message = message.into();
        match status_code {
            401 | 403 => Self::AuthenticationError(message),
            429 => Self::RateLimitExceeded(message),
            _ => Self::ApiError { status_code, message },
        }
    }
}

impl From<reqwest::Error> for ProviderError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_connect() || error.is_timeout() {
            Self::ConnectionError(error.to_string())
        } else if error.is_decode() {
            Self::ParseError(error.to_string())
        } else {
            Self::RequestFailed(error.to_string())
        }
    }
}

/// Errors that stop the process before any translation is attempted
#[derive(Error, Debug)]
pub enum StartupError {
    /// The API credential is not set
    #[error("{variable} not found in the environment or .env file")]
    MissingCredential {
        /// Name of the environment variable that was looked up
        variable: String,
    },

    /// No listed model supports content generation
    #[error("No text-generation model available for this API key.")]
    NoCapableModel,

    /// Listing the models failed
    #[error("Failed to list available models: {0}")]
    ModelListing(#[source] ProviderError),
}

/// Errors that can occur during translation
///
/// The model client failure is passed through untouched so the caller
/// sees exactly what the client reported.
#[derive(Error, Debug)]
pub enum TranslationError {
    /// Error from the provider API
    #[error(transparent)]
    Provider(#[from] ProviderError),
}
