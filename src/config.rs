//! Configuration file parser for ~/.config/watchdogs/config.toml.
//!
//! The config file is optional; a missing file yields `Config::default()`.
//! Unknown keys are accepted by serde but logged as warnings so typos show up
//! in the trace output.
use crate::news::{NewsSettings, StalePolicy};
use secrecy::SecretString;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

// ============================================================================
// Error Types
// ============================================================================

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid TOML in config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Config file too large: {0}")]
    TooLarge(String),
}

// ============================================================================
// Configuration Structs
// ============================================================================

/// Top-level application configuration.
///
/// All fields use `#[serde(default)]` so any subset of keys can be specified.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Theme variant name ("dark" or "light").
    pub theme: String,

    /// Optional roster file for the Politicians and Legislation tabs.
    pub directory: Option<PathBuf>,

    /// Headline endpoint settings.
    pub news: NewsConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            theme: "dark".to_string(),
            directory: None,
            news: NewsConfig::default(),
        }
    }
}

/// `[news]` table.
///
/// The API key can also come from `NEWS_API_KEY`; the env var wins.
#[derive(Clone, Deserialize)]
#[serde(default)]
pub struct NewsConfig {
    pub endpoint: String,
    pub country: String,
    pub category: String,
    pub api_key: Option<String>,
    /// Whole-request timeout in seconds.
    pub timeout_secs: u64,
    /// "discard" (only the newest request may update the list) or
    /// "overwrite" (every completion is applied as it arrives).
    pub stale_responses: StalePolicy,
}

impl Default for NewsConfig {
    fn default() -> Self {
        let defaults = NewsSettings::default();
        Self {
            endpoint: defaults.endpoint,
            country: defaults.country,
            category: defaults.category,
            api_key: None,
            timeout_secs: defaults.timeout.as_secs(),
            stale_responses: StalePolicy::default(),
        }
    }
}

impl std::fmt::Debug for NewsConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NewsConfig")
            .field("endpoint", &self.endpoint)
            .field("country", &self.country)
            .field("category", &self.category)
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .field("timeout_secs", &self.timeout_secs)
            .field("stale_responses", &self.stale_responses)
            .finish()
    }
}

impl NewsConfig {
    /// Resolve into client settings, consulting `NEWS_API_KEY` first.
    pub fn settings(&self) -> NewsSettings {
        let env_key = std::env::var("NEWS_API_KEY").ok().filter(|k| !k.is_empty());
        self.settings_with_key(env_key)
    }

    fn settings_with_key(&self, env_key: Option<String>) -> NewsSettings {
        let api_key = env_key
            .or_else(|| self.api_key.clone())
            .map(SecretString::from);

        NewsSettings {
            endpoint: self.endpoint.clone(),
            country: self.country.clone(),
            category: self.category.clone(),
            api_key,
            // a zero timeout would fail every request instantly
            timeout: Duration::from_secs(self.timeout_secs.max(1)),
        }
    }
}

const KNOWN_KEYS: [&str; 3] = ["theme", "directory", "news"];
const KNOWN_NEWS_KEYS: [&str; 6] = [
    "endpoint",
    "country",
    "category",
    "api_key",
    "timeout_secs",
    "stale_responses",
];

impl Config {
    /// Maximum config file size (1 MB).
    const MAX_FILE_SIZE: u64 = 1_048_576;

    /// Load configuration from a TOML file.
    ///
    /// - Missing file → `Ok(Config::default())`
    /// - Empty file → `Ok(Config::default())`
    /// - Invalid TOML → `Err(ConfigError::Parse)` with line number info
    /// - Unknown keys → accepted, logged as warning
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        match std::fs::metadata(path) {
            Ok(meta) if meta.len() > Self::MAX_FILE_SIZE => {
                return Err(ConfigError::TooLarge(format!(
                    "Config file is {} bytes (max {} bytes)",
                    meta.len(),
                    Self::MAX_FILE_SIZE
                )));
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "No config file found, using defaults");
                return Ok(Self::default());
            }
            Err(e) => return Err(ConfigError::Io(e)),
            Ok(_) => {}
        }

        let content = match std::fs::read_to_string(path) {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "Config file disappeared, using defaults");
                return Ok(Self::default());
            }
            Err(e) => return Err(ConfigError::Io(e)),
        };

        if content.trim().is_empty() {
            tracing::debug!(path = %path.display(), "Config file is empty, using defaults");
            return Ok(Self::default());
        }

        if let Ok(raw) = content.parse::<toml::Table>() {
            warn_unknown_keys(&raw);
        }

        let config: Config = toml::from_str(&content)?;
        tracing::info!(
            path = %path.display(),
            theme = %config.theme,
            country = %config.news.country,
            category = %config.news.category,
            "Loaded configuration"
        );
        Ok(config)
    }
}

fn warn_unknown_keys(raw: &toml::Table) {
    for key in raw.keys() {
        if !KNOWN_KEYS.contains(&key.as_str()) {
            tracing::warn!(key = %key, "Unknown key in config file, ignoring");
        }
    }
    if let Some(news) = raw.get("news").and_then(|v| v.as_table()) {
        for key in news.keys() {
            if !KNOWN_NEWS_KEYS.contains(&key.as_str()) {
                tracing::warn!(key = %key, "Unknown key in [news] section, ignoring");
            }
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.theme, "dark");
        assert!(config.directory.is_none());
        assert_eq!(config.news.endpoint, "https://newsapi.org");
        assert_eq!(config.news.country, "us");
        assert_eq!(config.news.category, "business");
        assert!(config.news.api_key.is_none());
        assert_eq!(config.news.timeout_secs, 30);
        assert_eq!(config.news.stale_responses, StalePolicy::Discard);
    }

    #[test]
    fn test_missing_file_returns_default() {
        let path = Path::new("/tmp/watchdogs_test_nonexistent_config.toml");
        let config = Config::load(path).unwrap();
        assert_eq!(config.theme, "dark");
    }

    #[test]
    fn test_whitespace_only_file_returns_default() {
        let dir = std::env::temp_dir().join("watchdogs_config_test_whitespace");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("config.toml");
        std::fs::write(&path, "   \n  \n  ").unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(config.news.country, "us");

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_partial_news_section_uses_defaults() {
        let dir = std::env::temp_dir().join("watchdogs_config_test_partial");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("config.toml");
        std::fs::write(&path, "[news]\ncountry = \"gb\"\n").unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(config.news.country, "gb");
        assert_eq!(config.news.category, "business");
        assert_eq!(config.theme, "dark");

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_full_config() {
        let dir = std::env::temp_dir().join("watchdogs_config_test_full");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("config.toml");

        let content = r#"
theme = "light"
directory = "/srv/roster.toml"

[news]
endpoint = "https://news.example.com"
country = "ca"
category = "technology"
api_key = "test-key-123"
timeout_secs = 10
stale_responses = "overwrite"
"#;
        std::fs::write(&path, content).unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(config.theme, "light");
        assert_eq!(config.directory, Some(PathBuf::from("/srv/roster.toml")));
        assert_eq!(config.news.endpoint, "https://news.example.com");
        assert_eq!(config.news.category, "technology");
        assert_eq!(config.news.api_key.as_deref(), Some("test-key-123"));
        assert_eq!(config.news.timeout_secs, 10);
        assert_eq!(config.news.stale_responses, StalePolicy::Overwrite);

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_invalid_toml_returns_error() {
        let dir = std::env::temp_dir().join("watchdogs_config_test_invalid");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("config.toml");
        std::fs::write(&path, "this is not [valid toml").unwrap();

        let err = Config::load(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
        assert!(err.to_string().contains("Invalid TOML"));

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_unknown_stale_policy_rejected() {
        let dir = std::env::temp_dir().join("watchdogs_config_test_policy");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("config.toml");
        std::fs::write(&path, "[news]\nstale_responses = \"sometimes\"\n").unwrap();

        assert!(Config::load(&path).is_err());

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_unknown_keys_accepted() {
        let dir = std::env::temp_dir().join("watchdogs_config_test_unknown");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("config.toml");
        std::fs::write(&path, "theme = \"dark\"\nfoo = 1\n[news]\npage_size = 20\n").unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(config.theme, "dark");

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_too_large_file_rejected() {
        let dir = std::env::temp_dir().join("watchdogs_config_test_too_large");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("config.toml");
        std::fs::write(&path, "a".repeat(1_048_577)).unwrap();

        let err = Config::load(&path).unwrap_err();
        assert!(matches!(err, ConfigError::TooLarge(_)));
        assert!(err.to_string().contains("too large"));

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_env_key_takes_precedence() {
        let news = NewsConfig {
            api_key: Some("from-file".to_string()),
            ..NewsConfig::default()
        };

        let settings = news.settings_with_key(Some("from-env".to_string()));
        assert_eq!(
            settings.api_key.as_ref().map(|k| k.expose_secret().to_string()),
            Some("from-env".to_string())
        );

        let settings = news.settings_with_key(None);
        assert_eq!(
            settings.api_key.as_ref().map(|k| k.expose_secret().to_string()),
            Some("from-file".to_string())
        );
    }

    #[test]
    fn test_zero_timeout_clamped() {
        let news = NewsConfig {
            timeout_secs: 0,
            ..NewsConfig::default()
        };
        assert_eq!(news.settings_with_key(None).timeout, Duration::from_secs(1));
    }

    #[test]
    fn test_debug_masks_api_key() {
        let mut config = Config::default();
        config.news.api_key = Some("super-secret-key-12345".to_string());

        let debug_output = format!("{:?}", config);
        assert!(!debug_output.contains("super-secret-key-12345"));
        assert!(debug_output.contains("[REDACTED]"));
    }
}
