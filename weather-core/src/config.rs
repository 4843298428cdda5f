use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::Path, path::PathBuf, time::Duration};

pub const DEFAULT_BASE_URL: &str = "https://opendata.cwa.gov.tw/api";
pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_ENVIRONMENT: &str = "development";
pub const DEFAULT_CITY: &str = "臺北市";

/// Runtime configuration of the weather proxy.
///
/// Values are layered: built-in defaults, then an optional TOML file, then
/// environment variables. The binary applies command-line flags on top.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// CWA open-data authorization key. Absent keys are reported per request.
    pub api_key: Option<String>,

    /// Example TOML:
    /// base_url = "https://opendata.cwa.gov.tw/api"
    pub base_url: String,

    pub port: u16,

    /// Deployment environment name, only used for logging.
    pub environment: String,

    /// City used by `/api/weather` when the caller gives none.
    pub default_city: String,

    /// Upstream request timeout. `None` waits indefinitely.
    pub request_timeout_secs: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            port: DEFAULT_PORT,
            environment: DEFAULT_ENVIRONMENT.to_string(),
            default_city: DEFAULT_CITY.to_string(),
            request_timeout_secs: None,
        }
    }
}

impl Config {
    /// Load config from the default file location (if present) and the process environment.
    pub fn load() -> Result<Self> {
        let path = Self::config_file_path()?;
        Self::load_from(&path, |key| std::env::var(key).ok())
    }

    /// Load config from `path` (if it exists) and apply overrides from `lookup`.
    pub fn load_from<F>(path: &Path, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut cfg = Self::from_file(path)?;
        cfg.apply_env(lookup)?;
        Ok(cfg)
    }

    /// Read a TOML file, or return defaults if it doesn't exist yet.
    pub fn from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let cfg: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(cfg)
    }

    /// Override fields from environment-style variables.
    ///
    /// Empty values are treated as unset.
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        if let Some(key) = get("CWA_API_KEY") {
            self.api_key = Some(key);
        }
        if let Some(url) = get("CWA_API_BASE_URL") {
            self.base_url = url;
        }
        if let Some(port) = get("PORT") {
            self.port = port
                .parse()
                .with_context(|| format!("Invalid PORT value '{port}'"))?;
        }
        if let Some(env) = get("APP_ENV").or_else(|| get("NODE_ENV")) {
            self.environment = env;
        }
        if let Some(city) = get("DEFAULT_CITY") {
            self.default_city = city;
        }
        if let Some(secs) = get("CWA_TIMEOUT_SECS") {
            let secs = secs
                .parse::<u64>()
                .with_context(|| format!("Invalid CWA_TIMEOUT_SECS value '{secs}'"))?;
            self.request_timeout_secs = Some(secs);
        }

        Ok(())
    }

    /// Returns the API key, if one is configured and non-empty.
    pub fn api_key(&self) -> Option<&str> {
        self.api_key.as_deref().filter(|k| !k.is_empty())
    }

    pub fn has_api_key(&self) -> bool {
        self.api_key().is_some()
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("tw", "cwa-weather", "weather-server")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }
}
