use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use std::default::Default;

/// Application configuration module
/// This module handles the application configuration including loading,
/// validating and saving configuration settings.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    /// Target language tag (e.g. "zh-TW", "fr")
    #[serde(default = "default_target_language")]
    pub target_language: String,

    /// Translation config
    #[serde(default)]
    pub translation: TranslationConfig,

    /// Reserved-token grammar config
    #[serde(default)]
    pub tokens: TokenGrammarConfig,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Translation provider type
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum TranslationProvider {
    // @provider: Google Gemini API
    #[default]
    Gemini,
    // @provider: Ollama (local LLM)
    Ollama,
    // @provider: Built-in simplified-to-traditional script conversion
    Script,
}

impl TranslationProvider {
    // @returns: Capitalized provider name
    pub fn display_name(&self) -> &str {
        match self {
            Self::Gemini => "Gemini",
            Self::Ollama => "Ollama",
            Self::Script => "Script conversion",
        }
    }

    // @returns: Lowercase provider identifier
    pub fn to_lowercase_string(&self) -> String {
        match self {
            Self::Gemini => "gemini".to_string(),
            Self::Ollama => "ollama".to_string(),
            Self::Script => "script".to_string(),
        }
    }
}

// Implement Display trait for TranslationProvider
impl std::fmt::Display for TranslationProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_lowercase_string())
    }
}

// Implement FromStr trait for TranslationProvider
impl std::str::FromStr for TranslationProvider {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "gemini" => Ok(Self::Gemini),
            "ollama" => Ok(Self::Ollama),
            "script" => Ok(Self::Script),
            _ => Err(anyhow!("Invalid provider type: {}", s)),
        }
    }
}

/// Provider configuration wrapper
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ProviderConfig {
    // @field: Provider type identifier
    #[serde(rename = "type")]
    pub provider_type: String,

    // @field: Model name
    #[serde(default = "String::new")]
    pub model: String,

    // @field: API key
    #[serde(default = "String::new")]
    pub api_key: String,

    // @field: Service URL
    #[serde(default = "String::new")]
    pub endpoint: String,

    // @field: Max concurrent batch requests
    #[serde(default = "default_concurrent_requests")]
    pub concurrent_requests: usize,

    // @field: Strings per batch request
    #[serde(default = "default_batch_size")]
    pub batch_size: usize,

    // @field: Timeout seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    // @field: Rate limit (requests per minute)
    #[serde(default)]
    pub rate_limit: Option<u32>,

    // @field: Custom character mapping TSV (script provider only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mapping_file: Option<String>,
}

impl ProviderConfig {
    // @param provider_type: Provider enum
    // @returns: Provider config with defaults
    pub fn new(provider_type: TranslationProvider) -> Self {
        match provider_type {
            TranslationProvider::Gemini => Self {
                provider_type: "gemini".to_string(),
                model: default_gemini_model(),
                api_key: String::new(),
                endpoint: default_gemini_endpoint(),
                concurrent_requests: default_concurrent_requests(),
                batch_size: default_batch_size(),
                timeout_secs: default_timeout_secs(),
                rate_limit: default_gemini_rate_limit(),
                mapping_file: None,
            },
            TranslationProvider::Ollama => Self {
                provider_type: "ollama".to_string(),
                model: default_ollama_model(),
                api_key: String::new(),
                endpoint: default_ollama_endpoint(),
                concurrent_requests: default_concurrent_requests(),
                batch_size: default_batch_size(),
                timeout_secs: default_timeout_secs(),
                rate_limit: default_ollama_rate_limit(),
                mapping_file: None,
            },
            TranslationProvider::Script => Self {
                provider_type: "script".to_string(),
                model: String::new(),
                api_key: String::new(),
                endpoint: String::new(),
                concurrent_requests: 1,
                batch_size: default_batch_size(),
                timeout_secs: default_timeout_secs(),
                rate_limit: None,
                mapping_file: None,
            },
        }
    }
}

/// Translation service configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct TranslationConfig {
    /// Translation provider to use
    #[serde(default)]
    pub provider: TranslationProvider,

    /// Available translation providers
    #[serde(default)]
    pub available_providers: Vec<ProviderConfig>,

    /// Common translation settings
    #[serde(default)]
    pub common: TranslationCommonConfig,
}

/// Common translation settings applicable to all providers
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct TranslationCommonConfig {
    /// Retry count for failed requests
    #[serde(default = "default_retry_count")]
    pub retry_count: u32,

    /// Backoff multiplier for retries (in milliseconds)
    #[serde(default = "default_retry_backoff_ms")]
    pub retry_backoff_ms: u64,

    /// Temperature parameter for text generation (0.0 to 1.0)
    /// Lower values make output more deterministic, higher values more creative
    #[serde(default = "default_temperature")]
    pub temperature: f32,
}

impl Default for TranslationCommonConfig {
    fn default() -> Self {
        Self {
            retry_count: default_retry_count(),
            retry_backoff_ms: default_retry_backoff_ms(),
            temperature: default_temperature(),
        }
    }
}

/// Masking strategy for reserved tokens around a translation call
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum MaskingMode {
    /// Replace each token with an opaque sentinel and restore it afterwards
    #[default]
    Sentinel,
    /// Leave tokens in place and trust the backend to pass them through;
    /// dropped tokens are still detected and logged
    Passthrough,
}

/// Reserved-token grammar configuration
///
/// Controls which substrings the placeholder guard protects across a
/// translation call. The `%identifier%` placeholder pattern is always on;
/// everything else is optional.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct TokenGrammarConfig {
    /// Protect `&c` / `§c` style color and formatting codes
    #[serde(default = "default_true")]
    pub color_codes: bool,

    /// Protect namespaced ids (`minecraft:diamond_sword`) and dotted
    /// permission nodes (`pluginname.command.give`)
    #[serde(default = "default_true")]
    pub technical_ids: bool,

    /// Bracketed reserved keywords protected as `[keyword]`
    #[serde(default = "default_bracket_keywords")]
    pub bracket_keywords: Vec<String>,

    /// Key-name prefixes whose whole subtree is copied verbatim
    #[serde(default = "default_protected_key_prefixes")]
    pub protected_key_prefixes: Vec<String>,

    /// How tokens are masked across the translation call
    #[serde(default)]
    pub masking: MaskingMode,
}

impl Default for TokenGrammarConfig {
    fn default() -> Self {
        Self {
            color_codes: true,
            technical_ids: true,
            bracket_keywords: default_bracket_keywords(),
            protected_key_prefixes: default_protected_key_prefixes(),
            masking: MaskingMode::default(),
        }
    }
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

fn default_target_language() -> String {
    "zh-TW".to_string()
}

fn default_concurrent_requests() -> usize {
    4
}

fn default_batch_size() -> usize {
    20
}

fn default_timeout_secs() -> u64 {
    60
}

fn default_retry_count() -> u32 {
    3 // Default to 3 retries
}

fn default_retry_backoff_ms() -> u64 {
    1000 // 1 second base backoff time, doubled on each retry
}

fn default_temperature() -> f32 {
    0.3
}

fn default_true() -> bool {
    true
}

fn default_gemini_endpoint() -> String {
    "https://generativelanguage.googleapis.com".to_string()
}

fn default_ollama_endpoint() -> String {
    "http://localhost:11434".to_string()
}

fn default_gemini_model() -> String {
    "gemini-1.5-flash".to_string()
}

fn default_ollama_model() -> String {
    "llama2".to_string()
}

fn default_gemini_rate_limit() -> Option<u32> {
    // The free-tier Gemini limit is 15 requests per minute; stay slightly
    // below it so our timer does not have to be perfectly synced
    Some(14)
}

fn default_ollama_rate_limit() -> Option<u32> {
    None // No rate limit by default for local provider
}

fn default_bracket_keywords() -> Vec<String> {
    // Reserved GUI keywords used by common menu plugins
    ["refresh", "console", "close", "message", "player", "commands"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

fn default_protected_key_prefixes() -> Vec<String> {
    vec!["requirements".to_string()]
}

impl Config {
    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> Result<()> {
        // Validate target language tag
        crate::language_utils::validate_language_tag(&self.target_language)?;

        // Gemini is the only provider that requires an API key
        if self.translation.provider == TranslationProvider::Gemini {
            let api_key = self.translation.get_api_key();
            if api_key.is_empty() {
                return Err(anyhow!("Translation API key is required for Gemini provider"));
            }
        }

        // Check the raw configured value; the getter silently substitutes
        // the default for 0 and would mask the misconfiguration
        if let Some(provider_config) = self.translation.get_active_provider_config() {
            if provider_config.batch_size == 0 {
                return Err(anyhow!("batch_size must be at least 1"));
            }
        }

        Ok(())
    }
}

/// Default implementation for Config
impl Default for Config {
    fn default() -> Self {
        Config {
            target_language: default_target_language(),
            translation: TranslationConfig::default(),
            tokens: TokenGrammarConfig::default(),
            log_level: LogLevel::default(),
        }
    }
}

impl TranslationConfig {
    pub fn optimal_concurrent_requests(&self) -> usize {
        // Check if the provider exists in the available_providers
        if let Some(provider_config) = self.get_active_provider_config() {
            return provider_config.concurrent_requests.max(1);
        }

        // Default fallback
        default_concurrent_requests()
    }

    /// Get the active provider configuration from the available_providers array
    pub fn get_active_provider_config(&self) -> Option<&ProviderConfig> {
        let provider_str = self.provider.to_lowercase_string();
        self.available_providers.iter()
            .find(|p| p.provider_type == provider_str)
    }

    /// Get a specific provider configuration by type for testing
    pub fn get_provider_config(&self, provider_type: &TranslationProvider) -> Option<&ProviderConfig> {
        let provider_str = provider_type.to_lowercase_string();
        self.available_providers.iter()
            .find(|p| p.provider_type == provider_str)
    }

    /// Get the model for the active provider
    pub fn get_model(&self) -> String {
        if let Some(provider_config) = self.get_active_provider_config() {
            if !provider_config.model.is_empty() {
                return provider_config.model.clone();
            }
        }

        // Default fallback based on provider type
        match self.provider {
            TranslationProvider::Gemini => default_gemini_model(),
            TranslationProvider::Ollama => default_ollama_model(),
            TranslationProvider::Script => String::new(),
        }
    }

    /// Get the API key for the active provider
    pub fn get_api_key(&self) -> String {
        if let Some(provider_config) = self.get_active_provider_config() {
            if !provider_config.api_key.is_empty() {
                return provider_config.api_key.clone();
            }
        }

        // Local providers don't use API keys
        String::new()
    }

    /// Get the endpoint for the active provider
    pub fn get_endpoint(&self) -> String {
        if let Some(provider_config) = self.get_active_provider_config() {
            if !provider_config.endpoint.is_empty() {
                return provider_config.endpoint.clone();
            }
        }

        // Default fallback based on provider type
        match self.provider {
            TranslationProvider::Gemini => default_gemini_endpoint(),
            TranslationProvider::Ollama => default_ollama_endpoint(),
            TranslationProvider::Script => String::new(),
        }
    }

    /// Get the batch size for the active provider
    pub fn get_batch_size(&self) -> usize {
        if let Some(provider_config) = self.get_active_provider_config() {
            if provider_config.batch_size > 0 {
                return provider_config.batch_size;
            }
        }

        // Default fallback
        default_batch_size()
    }

    /// Get the rate limit for the active provider
    pub fn get_rate_limit(&self) -> Option<u32> {
        if let Some(provider_config) = self.get_active_provider_config() {
            return provider_config.rate_limit;
        }

        // Default fallback based on provider type
        match self.provider {
            TranslationProvider::Gemini => default_gemini_rate_limit(),
            TranslationProvider::Ollama => default_ollama_rate_limit(),
            TranslationProvider::Script => None,
        }
    }
}

impl Default for TranslationConfig {
    fn default() -> Self {
        let mut config = Self {
            provider: TranslationProvider::default(),
            available_providers: Vec::new(),
            common: TranslationCommonConfig::default(),
        };

        // Add default providers
        config.available_providers.push(ProviderConfig::new(TranslationProvider::Gemini));
        config.available_providers.push(ProviderConfig::new(TranslationProvider::Ollama));
        config.available_providers.push(ProviderConfig::new(TranslationProvider::Script));

        config
    }
}
