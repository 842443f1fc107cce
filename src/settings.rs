//! Runtime settings for the generation backend.
//!
//! Layering, lowest to highest precedence:
//! 1. built-in defaults (`gpt-4o`, `dall-e-3`, `tts-1-hd`, voice `onyx`)
//! 2. environment (`OPENAI_BASE_URL`, `EZLO_TEXT_MODEL`, ...), `.env` included
//! 3. the API key stored by `ezlo config` (falls back to `OPENAI_API_KEY`)

use crate::errors::{EzloError, Result};
use crate::session::SiteConfig;

pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_TEXT_MODEL: &str = "gpt-4o";
pub const DEFAULT_IMAGE_MODEL: &str = "dall-e-3";
pub const DEFAULT_SPEECH_MODEL: &str = "tts-1-hd";
pub const DEFAULT_SPEECH_VOICE: &str = "onyx";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationSettings {
    pub api_key: String,
    pub base_url: String,
    pub text_model: String,
    pub image_model: String,
    pub speech_model: String,
    pub speech_voice: String,
}

impl Default for GenerationSettings {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: DEFAULT_BASE_URL.to_string(),
            text_model: DEFAULT_TEXT_MODEL.to_string(),
            image_model: DEFAULT_IMAGE_MODEL.to_string(),
            speech_model: DEFAULT_SPEECH_MODEL.to_string(),
            speech_voice: DEFAULT_SPEECH_VOICE.to_string(),
        }
    }
}

impl GenerationSettings {
    /// Resolve from the process environment.
    pub fn resolve(config: &SiteConfig) -> Self {
        Self::resolve_with(config, |name| std::env::var(name).ok())
    }

    /// Resolve with an explicit variable lookup.
    pub fn resolve_with<F>(config: &SiteConfig, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());
        let defaults = Self::default();

        let api_key = config
            .api_key
            .clone()
            .filter(|k| !k.is_empty())
            .or_else(|| var("OPENAI_API_KEY"))
            .unwrap_or_default();

        Self {
            api_key,
            base_url: var("OPENAI_BASE_URL")
                .map(|u| u.trim_end_matches('/').to_string())
                .unwrap_or(defaults.base_url),
            text_model: var("EZLO_TEXT_MODEL").unwrap_or(defaults.text_model),
            image_model: var("EZLO_IMAGE_MODEL").unwrap_or(defaults.image_model),
            speech_model: var("EZLO_SPEECH_MODEL").unwrap_or(defaults.speech_model),
            speech_voice: var("EZLO_SPEECH_VOICE").unwrap_or(defaults.speech_voice),
        }
    }

    /// Resolve for a command that needs the backend and the site.
    ///
    /// Fails with `NotConfigured` when the site path is unset or no API key
    /// is found in either the store or `OPENAI_API_KEY`.
    pub fn require(config: &SiteConfig) -> Result<Self> {
        Self::require_with(config, |name| std::env::var(name).ok())
    }

    pub fn require_with<F>(config: &SiteConfig, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let settings = Self::resolve_with(config, lookup);
        if !config.has_site_path() || settings.api_key.is_empty() {
            return Err(EzloError::NotConfigured);
        }
        Ok(settings)
    }
}

/// Mask all but the last four characters of a secret for display.
pub fn mask_secret(secret: &str) -> String {
    let chars: Vec<char> = secret.chars().collect();
    if chars.len() <= 4 {
        return "*".repeat(chars.len());
    }
    let visible: String = chars[chars.len() - 4..].iter().collect();
    format!("{}{}", "*".repeat(chars.len() - 4), visible)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name: &str| map.get(name).cloned()
    }

    #[test]
    fn test_defaults_without_env() {
        let config = SiteConfig {
            api_key: Some("sk-store".into()),
            ..Default::default()
        };
        let settings = GenerationSettings::resolve_with(&config, env(&[]));
        assert_eq!(settings.api_key, "sk-store");
        assert_eq!(settings.base_url, DEFAULT_BASE_URL);
        assert_eq!(settings.text_model, "gpt-4o");
        assert_eq!(settings.image_model, "dall-e-3");
        assert_eq!(settings.speech_model, "tts-1-hd");
        assert_eq!(settings.speech_voice, "onyx");
    }

    #[test]
    fn test_store_key_wins_over_env() {
        let config = SiteConfig {
            api_key: Some("sk-store".into()),
            ..Default::default()
        };
        let settings =
            GenerationSettings::resolve_with(&config, env(&[("OPENAI_API_KEY", "sk-env")]));
        assert_eq!(settings.api_key, "sk-store");
    }

    #[test]
    fn test_env_key_used_when_store_empty() {
        let settings = GenerationSettings::resolve_with(
            &SiteConfig::default(),
            env(&[("OPENAI_API_KEY", "sk-env")]),
        );
        assert_eq!(settings.api_key, "sk-env");
    }

    #[test]
    fn test_env_overrides_models_and_trims_base_url() {
        let settings = GenerationSettings::resolve_with(
            &SiteConfig::default(),
            env(&[
                ("OPENAI_BASE_URL", "http://localhost:8080/v1/"),
                ("EZLO_TEXT_MODEL", "gpt-4o-mini"),
                ("EZLO_SPEECH_VOICE", "  "),
            ]),
        );
        assert_eq!(settings.base_url, "http://localhost:8080/v1");
        assert_eq!(settings.text_model, "gpt-4o-mini");
        assert_eq!(settings.speech_voice, "onyx");
    }

    #[test]
    fn test_require_accepts_env_key_without_stored_key() {
        let config = SiteConfig {
            site_path: Some("/srv/site".into()),
            ..Default::default()
        };
        let settings =
            GenerationSettings::require_with(&config, env(&[("OPENAI_API_KEY", "sk-env")]))
                .unwrap();
        assert_eq!(settings.api_key, "sk-env");
    }

    #[test]
    fn test_require_fails_without_any_key() {
        let config = SiteConfig {
            site_path: Some("/srv/site".into()),
            ..Default::default()
        };
        let err = GenerationSettings::require_with(&config, env(&[])).unwrap_err();
        assert!(matches!(err, EzloError::NotConfigured));
    }

    #[test]
    fn test_require_fails_without_site_path() {
        let config = SiteConfig {
            api_key: Some("sk-store".into()),
            ..Default::default()
        };
        let err = GenerationSettings::require_with(&config, env(&[])).unwrap_err();
        assert!(matches!(err, EzloError::NotConfigured));
    }

    #[test]
    fn test_mask_secret() {
        assert_eq!(mask_secret("sk-abcdef1234"), "*********1234");
        assert_eq!(mask_secret("abc"), "***");
        assert_eq!(mask_secret(""), "");
    }
}
