use anyhow::{Context, Result};
use std::time::Duration;

pub const DEFAULT_TRANSLATION_API_URL: &str =
    "https://translation.googleapis.com/language/translate/v2";

#[derive(Debug, Clone)]
pub struct Config {
    // Translation provider
    pub translation_api_key: Option<String>,
    pub translation_api_url: String,
    pub translation_timeout_secs: u64,
    pub verify_source_text: bool,

    // Database
    pub database_url: Option<String>,
    pub database_max_connections: u32,

    // HTTP server
    pub api_key: Option<String>,
    pub port: u16,
}

/// Settings handed to the translation provider client.
///
/// The credential is resolved once here so the client never reads
/// process environment on its own.
#[derive(Debug, Clone)]
pub struct ProviderConfig {
    pub api_key: Option<String>,
    pub api_url: String,
    pub timeout: Duration,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            translation_api_key: non_empty_var("TRANSLATION_API_KEY"),
            translation_api_url: non_empty_var("TRANSLATION_API_URL")
                .unwrap_or_else(|| DEFAULT_TRANSLATION_API_URL.to_string()),
            translation_timeout_secs: parsed_var("TRANSLATION_TIMEOUT_SECS")
                .filter(|secs: &u64| *secs > 0)
                .unwrap_or(5),
            verify_source_text: match non_empty_var("TRANSLATION_VERIFY_SOURCE") {
                Some(v) => parse_flag(&v)
                    .with_context(|| format!("TRANSLATION_VERIFY_SOURCE is not a boolean: {}", v))?,
                None => true,
            },

            database_url: non_empty_var("DATABASE_URL"),
            database_max_connections: parsed_var("DATABASE_MAX_CONNECTIONS")
                .filter(|n: &u32| *n > 0)
                .unwrap_or(5),

            api_key: non_empty_var("API_KEY"),
            port: parsed_var("PORT").unwrap_or(8080),
        })
    }

    pub fn provider_config(&self) -> ProviderConfig {
        ProviderConfig {
            api_key: self.translation_api_key.clone(),
            api_url: self.translation_api_url.clone(),
            timeout: Duration::from_secs(self.translation_timeout_secs),
        }
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn parsed_var<T: std::str::FromStr>(name: &str) -> Option<T> {
    non_empty_var(name).and_then(|v| v.parse().ok())
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    const VARS: &[&str] = &[
        "TRANSLATION_API_KEY",
        "TRANSLATION_API_URL",
        "TRANSLATION_TIMEOUT_SECS",
        "TRANSLATION_VERIFY_SOURCE",
        "DATABASE_URL",
        "DATABASE_MAX_CONNECTIONS",
        "API_KEY",
        "PORT",
    ];

    fn clear_env() {
        for var in VARS {
            std::env::remove_var(var);
        }
    }

    #[test]
    #[serial]
    fn test_from_env_defaults() {
        clear_env();

        let config = Config::from_env().expect("Should load defaults");

        assert!(config.translation_api_key.is_none());
        assert_eq!(config.translation_api_url, DEFAULT_TRANSLATION_API_URL);
        assert_eq!(config.translation_timeout_secs, 5);
        assert!(config.verify_source_text);
        assert!(config.database_url.is_none());
        assert_eq!(config.database_max_connections, 5);
        assert!(config.api_key.is_none());
        assert_eq!(config.port, 8080);
    }

    #[test]
    #[serial]
    fn test_from_env_reads_values() {
        clear_env();
        std::env::set_var("TRANSLATION_API_KEY", "secret-key");
        std::env::set_var("TRANSLATION_API_URL", "http://localhost:9999/translate");
        std::env::set_var("TRANSLATION_TIMEOUT_SECS", "2");
        std::env::set_var("TRANSLATION_VERIFY_SOURCE", "off");
        std::env::set_var("DATABASE_URL", "postgres://u:p@localhost/yatra");
        std::env::set_var("PORT", "3000");

        let config = Config::from_env().expect("Should load");
        clear_env();

        assert_eq!(config.translation_api_key.as_deref(), Some("secret-key"));
        assert_eq!(config.translation_api_url, "http://localhost:9999/translate");
        assert_eq!(config.translation_timeout_secs, 2);
        assert!(!config.verify_source_text);
        assert_eq!(
            config.database_url.as_deref(),
            Some("postgres://u:p@localhost/yatra")
        );
        assert_eq!(config.port, 3000);
    }

    #[test]
    #[serial]
    fn test_blank_credential_is_treated_as_missing() {
        clear_env();
        std::env::set_var("TRANSLATION_API_KEY", "   ");

        let config = Config::from_env().expect("Should load");
        clear_env();

        assert!(config.translation_api_key.is_none());
    }

    #[test]
    #[serial]
    fn test_invalid_numbers_fall_back_to_defaults() {
        clear_env();
        std::env::set_var("PORT", "not-a-port");
        std::env::set_var("TRANSLATION_TIMEOUT_SECS", "-3");
        std::env::set_var("DATABASE_MAX_CONNECTIONS", "lots");

        let config = Config::from_env().expect("Should load");
        clear_env();

        assert_eq!(config.port, 8080);
        assert_eq!(config.translation_timeout_secs, 5);
        assert_eq!(config.database_max_connections, 5);
    }

    #[test]
    #[serial]
    fn test_zero_timeout_and_pool_size_fall_back_to_defaults() {
        clear_env();
        std::env::set_var("TRANSLATION_TIMEOUT_SECS", "0");
        std::env::set_var("DATABASE_MAX_CONNECTIONS", "0");

        let config = Config::from_env().expect("Should load");
        clear_env();

        assert_eq!(config.translation_timeout_secs, 5);
        assert_eq!(config.database_max_connections, 5);
        assert_eq!(config.provider_config().timeout, Duration::from_secs(5));
    }

    #[test]
    #[serial]
    fn test_invalid_verify_flag_is_an_error() {
        clear_env();
        std::env::set_var("TRANSLATION_VERIFY_SOURCE", "maybe");

        let result = Config::from_env();
        clear_env();

        assert!(result.is_err());
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("TRANSLATION_VERIFY_SOURCE"));
    }

    #[test]
    fn test_provider_config_carries_timeout() {
        let config = Config {
            translation_api_key: Some("k".to_string()),
            translation_api_url: "http://provider.test".to_string(),
            translation_timeout_secs: 7,
            verify_source_text: true,
            database_url: None,
            database_max_connections: 5,
            api_key: None,
            port: 8080,
        };

        let provider = config.provider_config();
        assert_eq!(provider.api_key.as_deref(), Some("k"));
        assert_eq!(provider.api_url, "http://provider.test");
        assert_eq!(provider.timeout, Duration::from_secs(7));
    }
}
