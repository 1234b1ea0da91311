/*!
 * Tests for application configuration
 */

use std::str::FromStr;

use docxlate::app_config::{Config, TranslationProvider};

#[test]
fn test_config_default_shouldValidate() {
    let config = Config::default();
    assert!(config.validate().is_ok());
}

#[test]
fn test_config_validate_withSameLanguages_shouldFail() {
    let mut config = Config::default();
    config.source_language = "en".to_string();
    config.target_language = "en".to_string();

    assert!(config.validate().is_err());
}

#[test]
fn test_config_validate_withBadLanguage_shouldFail() {
    let mut config = Config::default();
    config.source_language = "zz".to_string();

    assert!(config.validate().is_err());
}

#[test]
fn test_config_validate_withBadCooldownProbability_shouldFail() {
    let mut config = Config::default();
    config.translation.common.cooldown.probability = 1.5;

    assert!(config.validate().is_err());
}

#[test]
fn test_config_validate_withBadEndpoint_shouldFail() {
    let mut config = Config::default();
    for provider in &mut config.translation.available_providers {
        if provider.provider_type == "openai" {
            provider.endpoint = "not a url".to_string();
        }
    }

    assert!(config.validate().is_err());
}

#[test]
fn test_config_validate_withoutProviderEntry_shouldFail() {
    let mut config = Config::default();
    config.translation.available_providers.clear();

    assert!(config.validate().is_err());
}

#[test]
fn test_config_jsonRoundTrip_shouldPreserveFields() {
    let mut config = Config::default();
    config.domain_context = "legal contract".to_string();
    config.quota_words = Some(5000);

    let json = serde_json::to_string_pretty(&config).unwrap();
    let parsed: Config = serde_json::from_str(&json).unwrap();

    assert_eq!(parsed.source_language, config.source_language);
    assert_eq!(parsed.domain_context, "legal contract");
    assert_eq!(parsed.quota_words, Some(5000));
}

#[test]
fn test_config_minimalJson_shouldFillDefaults() {
    let json = r#"{
        "source_language": "fr",
        "target_language": "de",
        "translation": {}
    }"#;

    let config: Config = serde_json::from_str(json).unwrap();

    assert_eq!(config.source_language, "fr");
    assert_eq!(config.quota_words, None);
    assert!(config.domain_context.is_empty());
    assert!(!config.translation.available_providers.is_empty());
    assert!(config.validate().is_ok());
}

#[test]
fn test_provider_fromStr_shouldParseKnownNames() {
    assert_eq!(
        TranslationProvider::from_str("openai").unwrap(),
        TranslationProvider::OpenAI
    );
    assert_eq!(
        TranslationProvider::from_str("LMStudio").unwrap(),
        TranslationProvider::LMStudio
    );
    assert!(TranslationProvider::from_str("other").is_err());
}

#[test]
fn test_translationConfig_accessors_shouldUseActiveProvider() {
    let config = Config::default();

    assert_eq!(config.translation.provider, TranslationProvider::OpenAI);
    assert!(!config.translation.get_model().is_empty());
    assert_eq!(config.translation.get_timeout_secs(), 120);
}
