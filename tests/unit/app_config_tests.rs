/*!
 * Tests for application configuration functionality
 */

use mptranslate::app_config::{Config, MaskingMode, TranslationProvider};

/// Test default configuration values
#[test]
fn test_default_config_withNoParameters_shouldHaveCorrectDefaults() {
    let config = Config::default();

    assert_eq!(config.target_language, "zh-TW");
    assert_eq!(config.translation.provider, TranslationProvider::Gemini);

    let gemini_config = config.translation.get_provider_config(&TranslationProvider::Gemini)
        .expect("Gemini provider config should exist");
    assert_eq!(gemini_config.model, "gemini-1.5-flash");
    assert_eq!(gemini_config.concurrent_requests, 4);
    assert_eq!(gemini_config.batch_size, 20);
    assert_eq!(gemini_config.rate_limit, Some(14));

    let ollama_config = config.translation.get_provider_config(&TranslationProvider::Ollama)
        .expect("Ollama provider config should exist");
    assert_eq!(ollama_config.model, "llama2");
    assert_eq!(ollama_config.endpoint, "http://localhost:11434");
    assert_eq!(ollama_config.rate_limit, None);

    assert_eq!(config.tokens.masking, MaskingMode::Sentinel);
    assert!(config.tokens.color_codes);
    assert!(config.tokens.bracket_keywords.contains(&"close".to_string()));
    assert_eq!(config.tokens.protected_key_prefixes, vec!["requirements".to_string()]);
}

/// Test configuration validation
#[test]
fn test_config_validation_withVariousConfigs_shouldValidateCorrectly() {
    let mut config = Config::default();

    // Gemini with empty API key should fail validation
    assert!(config.validate().is_err());

    // Set a valid API key in available_providers
    if let Some(provider) = config.translation
        .available_providers
        .iter_mut()
        .find(|p| p.provider_type == "gemini") {
        provider.api_key = "AIza-test-key".to_string();
    }
    assert!(config.validate().is_ok());

    // Invalid target language
    config.target_language = "notalanguage".to_string();
    assert!(config.validate().is_err());
    config.target_language = "zh-TW".to_string();

    // batch_size of zero is rejected
    if let Some(provider) = config.translation
        .available_providers
        .iter_mut()
        .find(|p| p.provider_type == "gemini") {
        provider.batch_size = 0;
    }
    assert!(config.validate().is_err());
}

/// Test that local providers validate without an API key
#[test]
fn test_config_validation_withLocalProviders_shouldNotRequireApiKey() {
    let mut config = Config::default();

    config.translation.provider = TranslationProvider::Script;
    assert!(config.validate().is_ok());

    config.translation.provider = TranslationProvider::Ollama;
    assert!(config.validate().is_ok());
}

/// Test provider parsing from strings
#[test]
fn test_provider_fromStr_shouldParseKnownNamesOnly() {
    assert_eq!("gemini".parse::<TranslationProvider>().unwrap(), TranslationProvider::Gemini);
    assert_eq!("OLLAMA".parse::<TranslationProvider>().unwrap(), TranslationProvider::Ollama);
    assert_eq!("Script".parse::<TranslationProvider>().unwrap(), TranslationProvider::Script);
    assert!("googletrans".parse::<TranslationProvider>().is_err());
}

/// Test JSON round trip of the configuration file format
#[test]
fn test_config_serde_withPartialJson_shouldFillDefaults() {
    let json = r#"{
        "target_language": "fr",
        "translation": {
            "provider": "ollama"
        },
        "tokens": {
            "color_codes": false
        }
    }"#;

    let config: Config = serde_json::from_str(json).unwrap();
    assert_eq!(config.target_language, "fr");
    assert_eq!(config.translation.provider, TranslationProvider::Ollama);
    assert!(!config.tokens.color_codes);
    // Unspecified fields fall back to defaults
    assert!(config.tokens.technical_ids);
    assert_eq!(config.translation.common.retry_count, 3);

    // And the config survives a serialize/deserialize round trip
    let serialized = serde_json::to_string_pretty(&config).unwrap();
    let reparsed: Config = serde_json::from_str(&serialized).unwrap();
    assert_eq!(reparsed.target_language, "fr");
    assert!(!reparsed.tokens.color_codes);
}

/// Test per-provider lookups through the active provider config
#[test]
fn test_translationConfig_getters_shouldFollowActiveProvider() {
    let mut config = Config::default();
    config.translation.provider = TranslationProvider::Ollama;

    assert_eq!(config.translation.get_model(), "llama2");
    assert_eq!(config.translation.get_endpoint(), "http://localhost:11434");
    assert_eq!(config.translation.get_batch_size(), 20);
    assert_eq!(config.translation.optimal_concurrent_requests(), 4);
}
