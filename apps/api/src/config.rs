use anyhow::{Context, Result};

use crate::render::EncodingPolicy;

const DEFAULT_MODEL: &str = "mistral-large-latest";
const DEFAULT_BASE_URL: &str = "https://api.mistral.ai";
const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Application configuration loaded from environment variables.
/// Startup fails if a required variable is missing or a value does not parse.
#[derive(Debug, Clone)]
pub struct Config {
    pub mistral_api_key: String,
    pub mistral_model: String,
    pub mistral_base_url: String,
    /// `None` leaves the HTTP client without a timeout of its own.
    pub llm_timeout_secs: Option<u64>,
    pub encoding_policy: EncodingPolicy,
    pub max_upload_bytes: usize,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from an arbitrary key lookup. `from_env` passes the process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let require = |key: &str| {
            lookup(key)
                .filter(|v| !v.trim().is_empty())
                .with_context(|| format!("Required environment variable '{key}' is not set"))
        };

        let llm_timeout_secs = lookup("LLM_TIMEOUT_SECS")
            .map(|v| {
                v.parse::<u64>()
                    .context("LLM_TIMEOUT_SECS must be a whole number of seconds")
            })
            .transpose()?;

        let encoding_policy = match lookup("PDF_ENCODING_POLICY") {
            Some(v) => v
                .parse::<EncodingPolicy>()
                .context("PDF_ENCODING_POLICY must be 'strict' or 'replace'")?,
            None => EncodingPolicy::default(),
        };

        Ok(Config {
            mistral_api_key: require("MISTRAL_API_KEY")?,
            mistral_model: lookup("MISTRAL_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            mistral_base_url: lookup("MISTRAL_BASE_URL")
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            llm_timeout_secs,
            encoding_policy,
            max_upload_bytes: lookup("MAX_UPLOAD_BYTES")
                .map(|v| v.parse::<usize>())
                .transpose()
                .context("MAX_UPLOAD_BYTES must be a byte count")?
                .unwrap_or(DEFAULT_MAX_UPLOAD_BYTES),
            port: lookup("PORT")
                .unwrap_or_else(|| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: lookup("RUST_LOG").unwrap_or_else(|| "info".to_string()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_apply_when_only_api_key_is_set() {
        let config = Config::from_lookup(lookup_from(&[("MISTRAL_API_KEY", "sk-test")])).unwrap();
        assert_eq!(config.mistral_api_key, "sk-test");
        assert_eq!(config.mistral_model, DEFAULT_MODEL);
        assert_eq!(config.mistral_base_url, DEFAULT_BASE_URL);
        assert_eq!(config.llm_timeout_secs, None);
        assert_eq!(config.encoding_policy, EncodingPolicy::Strict);
        assert_eq!(config.max_upload_bytes, DEFAULT_MAX_UPLOAD_BYTES);
        assert_eq!(config.port, 8080);
        assert_eq!(config.rust_log, "info");
    }

    #[test]
    fn test_missing_api_key_fails() {
        let err = Config::from_lookup(lookup_from(&[])).unwrap_err();
        assert!(err.to_string().contains("MISTRAL_API_KEY"));
    }

    #[test]
    fn test_blank_api_key_fails() {
        assert!(Config::from_lookup(lookup_from(&[("MISTRAL_API_KEY", "  ")])).is_err());
    }

    #[test]
    fn test_overrides_are_parsed() {
        let config = Config::from_lookup(lookup_from(&[
            ("MISTRAL_API_KEY", "sk-test"),
            ("MISTRAL_MODEL", "mistral-small-latest"),
            ("LLM_TIMEOUT_SECS", "45"),
            ("PDF_ENCODING_POLICY", "replace"),
            ("MAX_UPLOAD_BYTES", "2048"),
            ("PORT", "9000"),
        ]))
        .unwrap();
        assert_eq!(config.mistral_model, "mistral-small-latest");
        assert_eq!(config.llm_timeout_secs, Some(45));
        assert_eq!(config.encoding_policy, EncodingPolicy::Replace);
        assert_eq!(config.max_upload_bytes, 2048);
        assert_eq!(config.port, 9000);
    }

    #[test]
    fn test_invalid_port_fails() {
        let result = Config::from_lookup(lookup_from(&[
            ("MISTRAL_API_KEY", "sk-test"),
            ("PORT", "not-a-port"),
        ]));
        assert!(result.is_err());
    }

    #[test]
    fn test_unknown_encoding_policy_fails() {
        let result = Config::from_lookup(lookup_from(&[
            ("MISTRAL_API_KEY", "sk-test"),
            ("PDF_ENCODING_POLICY", "utf8"),
        ]));
        assert!(result.is_err());
    }
}
