/*!
 * Translation service wiring configuration to a concrete backend.
 *
 * The service owns one backend client and implements both policy traits on
 * top of it, so the walkers stay backend-agnostic. LLM backends get a
 * rule-laden system prompt and marker framing for batches; script conversion
 * runs locally and never fails.
 */

use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use log::debug;
use url::Url;

use crate::app_config::{Config, TranslationProvider};
use crate::errors::{ProviderError, TranslationError};
use crate::language_utils;
use crate::providers::gemini::{Gemini, GeminiRequest};
use crate::providers::ollama::{GenerationRequest, Ollama};
use crate::providers::Provider;
use crate::translation::batch::{frame_entries, split_entries};
use crate::translation::policy::{BatchTranslationPolicy, TranslationPolicy};
use crate::translation::prompts::PromptBuilder;
use crate::translation::script::ScriptConverter;

/// The configured backend client
enum BackendClient {
    Gemini(Gemini),
    Ollama(Ollama),
    Script(ScriptConverter),
}

/// Translation service for a single target language
pub struct TranslationService {
    client: BackendClient,
    prompts: PromptBuilder,
    /// Model name, sent per request by backends that need it
    model: String,
    temperature: f32,
}

impl TranslationService {
    /// Create a service from the application configuration
    pub fn new(config: &Config) -> Result<Self> {
        let translation = &config.translation;
        let common = &translation.common;
        let target_name = language_utils::get_language_name(&config.target_language)?;

        let client = match translation.provider {
            TranslationProvider::Gemini => {
                let api_key = translation.get_api_key();
                if api_key.is_empty() {
                    return Err(anyhow!("Gemini provider requires an API key"));
                }
                BackendClient::Gemini(Gemini::new_with_config(
                    api_key,
                    translation.get_endpoint(),
                    translation.get_model(),
                    translation
                        .get_active_provider_config()
                        .map(|p| p.timeout_secs)
                        .unwrap_or(60),
                    common.retry_count,
                    common.retry_backoff_ms,
                    translation.get_rate_limit(),
                ))
            },
            TranslationProvider::Ollama => {
                let endpoint = translation.get_endpoint();
                let parsed = Url::parse(&endpoint)
                    .with_context(|| format!("Invalid Ollama endpoint: {}", endpoint))?;
                let host = format!(
                    "{}://{}",
                    parsed.scheme(),
                    parsed.host_str().unwrap_or("localhost")
                );
                let port = parsed.port().unwrap_or(11434);
                BackendClient::Ollama(Ollama::new_with_config(
                    host,
                    port,
                    translation
                        .get_active_provider_config()
                        .map(|p| p.timeout_secs)
                        .unwrap_or(60),
                    common.retry_count,
                    common.retry_backoff_ms,
                ))
            },
            TranslationProvider::Script => {
                let mapping_file = translation
                    .get_active_provider_config()
                    .and_then(|p| p.mapping_file.as_deref());
                let converter = match mapping_file {
                    Some(path) => ScriptConverter::with_mapping_file(path)?,
                    None => ScriptConverter::new(),
                };
                BackendClient::Script(converter)
            },
        };

        debug!(
            "Translation service: {} -> {}",
            translation.provider.display_name(),
            target_name
        );

        Ok(Self {
            client,
            prompts: PromptBuilder::new(target_name),
            model: translation.get_model(),
            temperature: common.temperature,
        })
    }

    /// Verify the backend is reachable; local script conversion always is
    pub async fn test_connection(&self) -> Result<(), ProviderError> {
        match &self.client {
            BackendClient::Gemini(client) => client.test_connection().await,
            BackendClient::Ollama(client) => client.test_connection().await,
            BackendClient::Script(_) => Ok(()),
        }
    }

    /// Send one prompt to the LLM backend and return the raw response text
    async fn complete_prompt(&self, prompt: String) -> Result<String, ProviderError> {
        match &self.client {
            BackendClient::Gemini(client) => {
                let request = GeminiRequest::from_prompt(prompt).temperature(self.temperature);
                let response = client.complete(request).await?;
                Ok(Gemini::extract_text(&response))
            },
            BackendClient::Ollama(client) => {
                let request = GenerationRequest::new(self.model.clone(), prompt)
                    .temperature(self.temperature);
                let response = client.complete(request).await?;
                Ok(Ollama::extract_text(&response))
            },
            BackendClient::Script(_) => {
                // Script conversion has no prompt path; callers dispatch on
                // the client before building prompts
                Err(ProviderError::RequestFailed(
                    "Script conversion does not accept prompts".to_string(),
                ))
            },
        }
    }
}

#[async_trait]
impl TranslationPolicy for TranslationService {
    async fn translate(&self, text: &str) -> Result<String, TranslationError> {
        if let BackendClient::Script(converter) = &self.client {
            return Ok(converter.convert(text));
        }

        let prompt = self.prompts.single_request(text);
        let response = self.complete_prompt(prompt).await?;
        Ok(response.trim().to_string())
    }
}

#[async_trait]
impl BatchTranslationPolicy for TranslationService {
    async fn translate_batch(&self, texts: &[String]) -> Result<Vec<String>, TranslationError> {
        if let BackendClient::Script(converter) = &self.client {
            return Ok(texts.iter().map(|t| converter.convert(t)).collect());
        }

        let framed = frame_entries(texts);
        let prompt = self.prompts.batch_request(&framed);
        let response = self.complete_prompt(prompt).await?;
        split_entries(&response, texts.len())
    }
}
