/*!
 * Error types for the mptranslate application.
 *
 * This module contains custom error types for different parts of the application,
 * using the thiserror crate for ergonomic error definitions.
 */

// Allow dead code - error types are for library consumers
#![allow(dead_code)]

use thiserror::Error;

/// Errors that can occur when working with provider APIs
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
        message: String
    },

    /// Error establishing or maintaining a connection
    #[error("Connection error: {0}")]
    ConnectionError(String),

    /// Error related to rate limiting
    #[error("Rate limit exceeded: {0}")]
    RateLimitExceeded(String),

    /// Error with authentication
    #[error("Authentication error: {0}")]
    AuthenticationError(String),
}

/// Errors that can occur while translating a document tree
#[derive(Error, Debug)]
pub enum TranslationError {
    /// Error from the provider API
    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),

    /// A batched response did not line up with the submitted entries.
    ///
    /// This indicates a backend contract violation, not a per-string content
    /// issue: the whole batch must be discarded rather than assigning the
    /// wrong translation to unrelated keys.
    #[error("Batch alignment failure: submitted {expected} entries, response contained {actual}")]
    BatchAlignment {
        /// Number of entries submitted in the batch
        expected: usize,
        /// Number of entries found in the response
        actual: usize,
    },

    /// A value violated the expected type contract.
    ///
    /// Unreachable through the public walker entry point; seeing this means a
    /// caller handed a policy something that is not a translatable string.
    #[error("Malformed input: {0}")]
    MalformedInput(String),
}

impl TranslationError {
    /// Whether this failure poisons the whole batch it occurred in
    pub fn is_batch_alignment(&self) -> bool {
        matches!(self, Self::BatchAlignment { .. })
    }
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from a file operation
    #[error("File error: {0}")]
    File(String),

    /// Error parsing or serializing a locale document
    #[error("Document error: {0}")]
    Document(String),

    /// Error in the application configuration
    #[error("Config error: {0}")]
    Config(String),

    /// Error from a provider
    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),

    /// Error from translation
    #[error("Translation error: {0}")]
    Translation(#[from] TranslationError),

    /// Any other error
    #[error("Unknown error: {0}")]
    Unknown(String),
}

// Utility functions for error conversion
impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        Self::Unknown(error.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::File(error.to_string())
    }
}
