//! Client configuration, built from the environment.

use std::collections::HashMap;
use thiserror::Error;

pub const DATETIME_FORMAT: &str = "%d-%m-%y %H:%M";

#[derive(Debug, Clone)]
pub struct Config {
    pub url: String,
    pub chat_url: String,
    pub file_url: String,
    pub test_url: String,
    pub test_chat_url: String,
    pub test_file_url: String,
    pub is_test: bool,
    pub default_decimal: u32,
    pub datetime_format: String,
    pub max_accounts: usize,
    /// Reconciliation cadence per open view, in milliseconds.
    pub sync_interval_ms: u64,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingEnv(String),
    #[error("Invalid value for {0}: {1}")]
    InvalidValue(String, String),
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_env_map(std::env::vars().collect())
    }

    pub fn from_env_map(env_map: HashMap<String, String>) -> Result<Self, ConfigError> {
        let url = env_map
            .get("FEXPS_URL")
            .cloned()
            .ok_or_else(|| ConfigError::MissingEnv("FEXPS_URL".to_string()))?;
        let chat_url = env_map
            .get("FEXPS_CHAT_URL")
            .cloned()
            .ok_or_else(|| ConfigError::MissingEnv("FEXPS_CHAT_URL".to_string()))?;
        let file_url = env_map
            .get("FEXPS_FILE_URL")
            .cloned()
            .ok_or_else(|| ConfigError::MissingEnv("FEXPS_FILE_URL".to_string()))?;

        // Test variants fall back to the production urls when unset.
        let test_url = env_map.get("FEXPS_TEST_URL").cloned().unwrap_or_else(|| url.clone());
        let test_chat_url = env_map
            .get("FEXPS_TEST_CHAT_URL")
            .cloned()
            .unwrap_or_else(|| chat_url.clone());
        let test_file_url = env_map
            .get("FEXPS_TEST_FILE_URL")
            .cloned()
            .unwrap_or_else(|| file_url.clone());

        let is_test = match env_map.get("FEXPS_IS_TEST").map(|s| s.as_str()).unwrap_or("false") {
            "true" | "1" => true,
            "false" | "0" => false,
            other => {
                return Err(ConfigError::InvalidValue(
                    "FEXPS_IS_TEST".to_string(),
                    format!("must be true or false, got {}", other),
                ))
            }
        };

        let max_accounts = env_map
            .get("FEXPS_MAX_ACCOUNTS")
            .map(|s| s.as_str())
            .unwrap_or("3")
            .parse::<usize>()
            .map_err(|_| {
                ConfigError::InvalidValue(
                    "FEXPS_MAX_ACCOUNTS".to_string(),
                    "must be a valid usize".to_string(),
                )
            })?;

        let sync_interval_ms = env_map
            .get("FEXPS_SYNC_INTERVAL_MS")
            .map(|s| s.as_str())
            .unwrap_or("5000")
            .parse::<u64>()
            .map_err(|_| {
                ConfigError::InvalidValue(
                    "FEXPS_SYNC_INTERVAL_MS".to_string(),
                    "must be a valid u64".to_string(),
                )
            })?;

        Ok(Config {
            url,
            chat_url,
            file_url,
            test_url,
            test_chat_url,
            test_file_url,
            is_test,
            default_decimal: 2,
            datetime_format: DATETIME_FORMAT.to_string(),
            max_accounts,
            sync_interval_ms,
        })
    }

    /// Active API host, honoring the test switch.
    pub fn api_url(&self) -> &str {
        if self.is_test {
            &self.test_url
        } else {
            &self.url
        }
    }

    pub fn chat_ws_url(&self) -> &str {
        if self.is_test {
            &self.test_chat_url
        } else {
            &self.chat_url
        }
    }

    pub fn file_ws_url(&self) -> &str {
        if self.is_test {
            &self.test_file_url
        } else {
            &self.file_url
        }
    }

    /// Fixed configuration for integration tests; no environment needed.
    pub fn for_tests() -> Self {
        Config {
            url: "http://localhost:8080".to_string(),
            chat_url: "ws://localhost:8081/chat".to_string(),
            file_url: "ws://localhost:8081/files".to_string(),
            test_url: "http://localhost:8080".to_string(),
            test_chat_url: "ws://localhost:8081/chat".to_string(),
            test_file_url: "ws://localhost:8081/files".to_string(),
            is_test: true,
            default_decimal: 2,
            datetime_format: DATETIME_FORMAT.to_string(),
            max_accounts: 3,
            sync_interval_ms: 50,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup_required_env() -> HashMap<String, String> {
        let mut map = HashMap::new();
        map.insert("FEXPS_URL".to_string(), "https://api.fexps.com".to_string());
        map.insert(
            "FEXPS_CHAT_URL".to_string(),
            "wss://api.fexps.com/chat".to_string(),
        );
        map.insert(
            "FEXPS_FILE_URL".to_string(),
            "wss://api.fexps.com/files".to_string(),
        );
        map
    }

    #[test]
    fn test_missing_url() {
        let mut env_map = setup_required_env();
        env_map.remove("FEXPS_URL");
        match Config::from_env_map(env_map) {
            Err(ConfigError::MissingEnv(s)) => assert_eq!(s, "FEXPS_URL"),
            _ => panic!("Expected MissingEnv error"),
        }
    }

    #[test]
    fn test_defaults() {
        let config = Config::from_env_map(setup_required_env()).unwrap();
        assert!(!config.is_test);
        assert_eq!(config.default_decimal, 2);
        assert_eq!(config.max_accounts, 3);
        assert_eq!(config.api_url(), "https://api.fexps.com");
        assert_eq!(config.datetime_format, "%d-%m-%y %H:%M");
    }

    #[test]
    fn test_test_variant_selection() {
        let mut env_map = setup_required_env();
        env_map.insert("FEXPS_IS_TEST".to_string(), "true".to_string());
        env_map.insert(
            "FEXPS_TEST_URL".to_string(),
            "https://test.fexps.com".to_string(),
        );
        let config = Config::from_env_map(env_map).unwrap();
        assert_eq!(config.api_url(), "https://test.fexps.com");
        // Unset test variants fall back to production.
        assert_eq!(config.chat_ws_url(), "wss://api.fexps.com/chat");
    }

    #[test]
    fn test_invalid_is_test() {
        let mut env_map = setup_required_env();
        env_map.insert("FEXPS_IS_TEST".to_string(), "maybe".to_string());
        match Config::from_env_map(env_map) {
            Err(ConfigError::InvalidValue(k, _)) => assert_eq!(k, "FEXPS_IS_TEST"),
            _ => panic!("Expected InvalidValue error"),
        }
    }
}
