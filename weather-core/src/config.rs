use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{
    fmt, fs,
    path::{Path, PathBuf},
};

use crate::error::WeatherError;

/// Current-weather endpoint of OpenWeatherMap.
pub const DEFAULT_ENDPOINT: &str = "https://api.openweathermap.org/data/2.5/weather";

/// Environment variable holding the API key; takes precedence over the config file.
pub const API_KEY_ENV: &str = "OPENWEATHER_API_KEY";

/// Environment variable overriding the endpoint.
pub const ENDPOINT_ENV: &str = "OPENWEATHER_ENDPOINT";

/// Configuration stored on disk.
///
/// Example TOML:
/// ```toml
/// api_key = "..."
/// # endpoint = "https://api.openweathermap.org/data/2.5/weather"
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Config {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,
}

impl Config {
    /// Load config from the platform config directory, or return an empty default
    /// if it doesn't exist yet.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_file_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            // First run: no config file, return empty.
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let cfg: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(cfg)
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<PathBuf> {
        let path = Self::config_file_path()?;
        self.save_to(&path)?;
        Ok(path)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "weather-task", "weather-cli")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }

    pub fn set_api_key(&mut self, api_key: String) {
        self.api_key = Some(api_key);
    }

    /// Returns the stored API key, ignoring blank values.
    pub fn api_key(&self) -> Option<&str> {
        non_blank(self.api_key.as_deref())
    }
}

/// Endpoint and credential used by [`WeatherClient`](crate::WeatherClient).
///
/// Fixed once built: there are no setters and nothing reloads it.
#[derive(Clone, PartialEq, Eq)]
pub struct ClientConfig {
    endpoint: String,
    api_key: String,
}

impl ClientConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::with_endpoint(DEFAULT_ENDPOINT, api_key)
    }

    pub fn with_endpoint(endpoint: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            api_key: api_key.into(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    /// Build the client config from the process environment and the config file.
    pub fn from_env(file: &Config) -> Result<Self, WeatherError> {
        Self::resolve(file, |name| std::env::var(name).ok())
    }

    /// Environment first, then the config file. The endpoint falls back to
    /// [`DEFAULT_ENDPOINT`]; the key has no fallback.
    pub fn resolve(
        file: &Config,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, WeatherError> {
        let api_key = non_blank(env(API_KEY_ENV).as_deref())
            .or_else(|| file.api_key())
            .map(str::to_owned)
            .ok_or_else(|| {
                WeatherError::Configuration(format!(
                    "No API key configured.\n\
                     Hint: run `weather configure` or set {API_KEY_ENV}."
                ))
            })?;

        let endpoint = non_blank(env(ENDPOINT_ENV).as_deref())
            .or_else(|| non_blank(file.endpoint.as_deref()))
            .unwrap_or(DEFAULT_ENDPOINT)
            .to_owned();

        reqwest::Url::parse(&endpoint).map_err(|e| {
            WeatherError::Configuration(format!("Invalid endpoint '{endpoint}': {e}"))
        })?;

        Ok(Self { endpoint, api_key })
    }
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("endpoint", &self.endpoint)
            .field("api_key", &"<redacted>")
            .finish()
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env_of(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name: &str| vars.get(name).cloned()
    }

    #[test]
    fn resolve_errors_when_no_key_anywhere() {
        let err = ClientConfig::resolve(&Config::default(), env_of(&[])).unwrap_err();

        assert!(matches!(err, WeatherError::Configuration(_)));
        let msg = err.to_string();
        assert!(msg.contains("No API key configured"));
        assert!(msg.contains("weather configure"));
    }

    #[test]
    fn resolve_prefers_env_over_file() {
        let mut cfg = Config::default();
        cfg.set_api_key("FILE_KEY".into());

        let client = ClientConfig::resolve(&cfg, env_of(&[(API_KEY_ENV, "ENV_KEY")])).unwrap();
        assert_eq!(client.api_key(), "ENV_KEY");
        assert_eq!(client.endpoint(), DEFAULT_ENDPOINT);
    }

    #[test]
    fn resolve_falls_back_to_file_when_env_is_blank() {
        let mut cfg = Config::default();
        cfg.set_api_key("FILE_KEY".into());

        let client = ClientConfig::resolve(&cfg, env_of(&[(API_KEY_ENV, "  ")])).unwrap();
        assert_eq!(client.api_key(), "FILE_KEY");
    }

    #[test]
    fn resolve_ignores_blank_file_key() {
        let cfg = Config {
            api_key: Some(String::new()),
            endpoint: None,
        };

        assert!(ClientConfig::resolve(&cfg, env_of(&[])).is_err());
    }

    #[test]
    fn resolve_endpoint_precedence() {
        let cfg = Config {
            api_key: Some("KEY".into()),
            endpoint: Some("http://file.example/weather".into()),
        };

        let from_file = ClientConfig::resolve(&cfg, env_of(&[])).unwrap();
        assert_eq!(from_file.endpoint(), "http://file.example/weather");

        let from_env =
            ClientConfig::resolve(&cfg, env_of(&[(ENDPOINT_ENV, "http://env.example/w")])).unwrap();
        assert_eq!(from_env.endpoint(), "http://env.example/w");
    }

    #[test]
    fn resolve_rejects_unparsable_endpoint() {
        let err = ClientConfig::resolve(
            &Config::default(),
            env_of(&[(API_KEY_ENV, "KEY"), (ENDPOINT_ENV, "not a url")]),
        )
        .unwrap_err();

        assert!(err.to_string().contains("Invalid endpoint"));
    }

    #[test]
    fn debug_redacts_api_key() {
        let cfg = ClientConfig::new("SECRET");
        let printed = format!("{cfg:?}");

        assert!(!printed.contains("SECRET"));
        assert!(printed.contains(DEFAULT_ENDPOINT));
    }

    #[test]
    fn load_from_missing_file_returns_default() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = Config::load_from(&dir.path().join("config.toml")).unwrap();

        assert_eq!(cfg, Config::default());
    }

    #[test]
    fn save_then_load_keeps_values() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut cfg = Config::default();
        cfg.set_api_key("OPEN_KEY".into());
        cfg.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.api_key(), Some("OPEN_KEY"));
        assert_eq!(loaded.endpoint, None);
    }

    #[test]
    fn load_from_reports_parse_errors() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "api_key = [").unwrap();

        let err = Config::load_from(&path).unwrap_err();
        assert!(err.to_string().contains("Failed to parse config file"));
    }
}
