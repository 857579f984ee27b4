use std::str::FromStr;

use anyhow::{Context, Result};

use crate::llm_client::{
    CompletionSettings, DEFAULT_API_URL, DEFAULT_MAX_TOKENS, DEFAULT_MODEL, DEFAULT_TEMPERATURE,
};

const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Application configuration loaded from environment variables.
/// Startup fails if `GROQ_API_KEY` is missing or a numeric variable does not parse.
#[derive(Debug, Clone)]
pub struct Config {
    pub groq_api_key: String,
    pub groq_api_url: String,
    pub groq_model: String,
    pub temperature: f32,
    pub max_tokens: u32,
    pub port: u16,
    pub rust_log: String,
    /// Request body limit for resume uploads.
    pub max_upload_bytes: usize,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            groq_api_key: require_env("GROQ_API_KEY")?,
            groq_api_url: optional_env("GROQ_API_URL")
                .unwrap_or_else(|| DEFAULT_API_URL.to_string()),
            groq_model: optional_env("GROQ_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            temperature: parse_or(
                "GROQ_TEMPERATURE",
                optional_env("GROQ_TEMPERATURE"),
                DEFAULT_TEMPERATURE,
            )?,
            max_tokens: parse_or(
                "GROQ_MAX_TOKENS",
                optional_env("GROQ_MAX_TOKENS"),
                DEFAULT_MAX_TOKENS,
            )?,
            port: parse_or("PORT", optional_env("PORT"), 8080)?,
            rust_log: optional_env("RUST_LOG").unwrap_or_else(|| "info".to_string()),
            max_upload_bytes: parse_or(
                "MAX_UPLOAD_BYTES",
                optional_env("MAX_UPLOAD_BYTES"),
                DEFAULT_MAX_UPLOAD_BYTES,
            )?,
        })
    }

    /// Settings for the completion client; the API key travels only through here.
    pub fn completion_settings(&self) -> CompletionSettings {
        CompletionSettings {
            api_key: self.groq_api_key.clone(),
            api_url: self.groq_api_url.clone(),
            model: self.groq_model.clone(),
            temperature: self.temperature,
            max_tokens: self.max_tokens,
        }
    }
}

fn require_env(key: &str) -> Result<String> {
    optional_env(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

/// Unset and blank values both count as absent.
fn optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn parse_or<T>(key: &str, raw: Option<String>, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match raw {
        Some(value) => value
            .trim()
            .parse::<T>()
            .with_context(|| format!("{key} must be a valid {}", std::any::type_name::<T>())),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_or_uses_default_when_absent() {
        assert_eq!(parse_or::<u16>("PORT", None, 8080).unwrap(), 8080);
    }

    #[test]
    fn test_parse_or_parses_value() {
        assert_eq!(parse_or::<u16>("PORT", Some(" 3000 ".into()), 8080).unwrap(), 3000);
        let t = parse_or::<f32>("GROQ_TEMPERATURE", Some("0.2".into()), 0.7).unwrap();
        assert!((t - 0.2).abs() < f32::EPSILON);
    }

    #[test]
    fn test_parse_or_rejects_garbage() {
        let err = parse_or::<u16>("PORT", Some("eighty".into()), 8080).unwrap_err();
        assert!(err.to_string().contains("PORT"));
    }

    #[test]
    fn test_completion_settings_carry_config() {
        let config = Config {
            groq_api_key: "key".into(),
            groq_api_url: DEFAULT_API_URL.into(),
            groq_model: "custom-model".into(),
            temperature: 0.3,
            max_tokens: 900,
            port: 8080,
            rust_log: "info".into(),
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
        };
        let settings = config.completion_settings();
        assert_eq!(settings.api_key, "key");
        assert_eq!(settings.model, "custom-model");
        assert_eq!(settings.max_tokens, 900);
    }
}
