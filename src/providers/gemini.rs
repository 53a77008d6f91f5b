use std::time::Duration;
use serde::{Serialize, Deserialize};
use reqwest::Client;
use log::{debug, error};
use async_trait::async_trait;

use crate::errors::ProviderError;
use crate::providers::Provider;

/// Gemini client for interacting with the Google Generative Language API
#[derive(Debug)]
pub struct Gemini {
    /// HTTP client for API requests
    client: Client,
    /// API key for authentication
    api_key: String,
    /// API endpoint URL (optional, defaults to the public API)
    endpoint: String,
    /// Model name to call
    model: String,
    /// Maximum number of retry attempts
    max_retries: u32,
    /// Base backoff time in milliseconds for exponential backoff
    backoff_base_ms: u64,
    /// Optional rate limit in requests per minute
    rate_limit: Option<u32>,
}

/// Gemini generateContent request
#[derive(Debug, Serialize)]
pub struct GeminiRequest {
    /// Conversation contents
    contents: Vec<GeminiContent>,

    /// Generation parameters
    #[serde(rename = "generationConfig", skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationConfig>,
}

/// A single content block in a Gemini request or response
#[derive(Debug, Serialize, Deserialize)]
pub struct GeminiContent {
    /// Ordered parts of the content
    pub parts: Vec<GeminiPart>,

    /// Role of the content producer (user, model)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
}

/// One part of a content block
#[derive(Debug, Serialize, Deserialize)]
pub struct GeminiPart {
    /// Text payload
    pub text: String,
}

/// Generation parameters
#[derive(Debug, Serialize)]
pub struct GenerationConfig {
    /// Temperature for generation
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
}

/// Gemini generateContent response
#[derive(Debug, Deserialize)]
pub struct GeminiResponse {
    /// Generated candidates
    #[serde(default)]
    pub candidates: Vec<GeminiCandidate>,

    /// Token accounting, when the API reports it
    #[serde(rename = "usageMetadata")]
    pub usage_metadata: Option<UsageMetadata>,
}

/// A single response candidate
#[derive(Debug, Deserialize)]
pub struct GeminiCandidate {
    /// Candidate content
    pub content: Option<GeminiContent>,
}

/// Token usage information
#[derive(Debug, Deserialize)]
pub struct UsageMetadata {
    /// Number of prompt tokens
    #[serde(rename = "promptTokenCount", default)]
    pub prompt_token_count: u64,
    /// Number of generated tokens
    #[serde(rename = "candidatesTokenCount", default)]
    pub candidates_token_count: u64,
}

impl GeminiRequest {
    /// Create a request from a single user prompt
    pub fn from_prompt(prompt: impl Into<String>) -> Self {
        Self {
            contents: vec![GeminiContent {
                parts: vec![GeminiPart { text: prompt.into() }],
                role: Some("user".to_string()),
            }],
            generation_config: None,
        }
    }

    /// Set the temperature
    pub fn temperature(mut self, temperature: f32) -> Self {
        self.generation_config = Some(GenerationConfig { temperature: Some(temperature) });
        self
    }
}

impl Gemini {
    /// Create a new Gemini client with retry and rate limit configuration
    pub fn new_with_config(
        api_key: impl Into<String>,
        endpoint: impl Into<String>,
        model: impl Into<String>,
        timeout_secs: u64,
        max_retries: u32,
        backoff_base_ms: u64,
        rate_limit: Option<u32>,
    ) -> Self {
        Self {
            client: Client::builder()
                .timeout(Duration::from_secs(timeout_secs))
                .build()
                .unwrap_or_default(),
            api_key: api_key.into(),
            endpoint: endpoint.into(),
            model: model.into(),
            max_retries,
            backoff_base_ms,
            rate_limit,
        }
    }

    /// Request URL for the configured model
    fn request_url(&self) -> String {
        let base = if self.endpoint.is_empty() {
            "https://generativelanguage.googleapis.com".to_string()
        } else {
            self.endpoint.trim_end_matches('/').to_string()
        };
        format!("{}/v1beta/models/{}:generateContent?key={}", base, self.model, self.api_key)
    }

    /// Send a generateContent request with retry logic
    async fn generate(&self, request: &GeminiRequest) -> Result<GeminiResponse, ProviderError> {
        let url = self.request_url();
        let mut attempt = 0;
        let mut last_error = ProviderError::RequestFailed("No attempts made".to_string());

        while attempt <= self.max_retries {
            // Respect the configured request budget between retries
            if attempt > 0 {
                let backoff = self.backoff_base_ms * (1 << (attempt - 1));
                let delay = match self.rate_limit {
                    Some(limit) if limit > 0 => backoff.max(60_000 / limit as u64),
                    _ => backoff,
                };
                tokio::time::sleep(Duration::from_millis(delay)).await;
            }

            let response = match self.client.post(&url).json(request).send().await {
                Ok(response) => response,
                Err(e) => {
                    last_error = ProviderError::ConnectionError(e.to_string());
                    attempt += 1;
                    continue;
                },
            };

            let status = response.status();
            if status.is_success() {
                return response.json::<GeminiResponse>().await
                    .map_err(|e| ProviderError::ParseError(e.to_string()));
            }

            let message = response.text().await
                .unwrap_or_else(|_| "Failed to get error response text".to_string());
            error!("Gemini API error ({}): {}", status, message);

            last_error = match status.as_u16() {
                429 => ProviderError::RateLimitExceeded(message),
                401 | 403 => ProviderError::AuthenticationError(message),
                code => ProviderError::ApiError { status_code: code, message },
            };

            // Authentication failures will not improve with retries
            if matches!(last_error, ProviderError::AuthenticationError(_)) {
                return Err(last_error);
            }
            attempt += 1;
        }

        Err(last_error)
    }
}

#[async_trait]
impl Provider for Gemini {
    type Request = GeminiRequest;
    type Response = GeminiResponse;

    async fn complete(&self, request: Self::Request) -> Result<Self::Response, ProviderError> {
        let response = self.generate(&request).await?;
        if let Some(usage) = &response.usage_metadata {
            debug!(
                "Gemini usage: {} prompt tokens, {} completion tokens",
                usage.prompt_token_count, usage.candidates_token_count
            );
        }
        Ok(response)
    }

    async fn test_connection(&self) -> Result<(), ProviderError> {
        let request = GeminiRequest::from_prompt("Hello");
        self.generate(&request).await?;
        Ok(())
    }

    fn extract_text(response: &Self::Response) -> String {
        response.candidates.iter()
            .filter_map(|c| c.content.as_ref())
            .flat_map(|content| content.parts.iter())
            .map(|part| part.text.as_str())
            .collect()
    }
}
