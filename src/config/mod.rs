use crate::errors::{AppError, AppResult};
use crate::ui::messages::success;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

pub const DEFAULT_API_BASE_URL: &str = "https://api.galaxydigital.com/api";
pub const DEFAULT_GCAL_BASE_URL: &str = "https://www.googleapis.com/calendar/v3/calendars/";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_catalog")]
    pub catalog: String,
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,
    #[serde(default = "default_gcal_base_url")]
    pub gcal_base_url: String,
    /// Seconds, per HTTP request.
    #[serde(default = "default_http_timeout")]
    pub http_timeout: u64,
    /// Minimum similarity score (0-100) for a keyword match to be trusted.
    #[serde(default = "default_match_threshold")]
    pub match_threshold: u8,
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,
    #[serde(default = "default_retry_delay_ms")]
    pub retry_delay_ms: u64,

    /// Bearer token for the volunteer platform (AMPLIFY_TOKEN).
    #[serde(skip)]
    pub amplify_token: Option<String>,
    /// Calendar API key (GCAL_TOKEN).
    #[serde(skip)]
    pub gcal_token: Option<String>,
}

fn default_catalog() -> String {
    "~/.starpass/catalog.yaml".to_string()
}
fn default_api_base_url() -> String {
    DEFAULT_API_BASE_URL.to_string()
}
fn default_gcal_base_url() -> String {
    DEFAULT_GCAL_BASE_URL.to_string()
}
fn default_http_timeout() -> u64 {
    3
}
fn default_match_threshold() -> u8 {
    80
}
fn default_max_attempts() -> u32 {
    3
}
fn default_retry_delay_ms() -> u64 {
    500
}

impl Default for Config {
    fn default() -> Self {
        Self {
            catalog: default_catalog(),
            api_base_url: default_api_base_url(),
            gcal_base_url: default_gcal_base_url(),
            http_timeout: default_http_timeout(),
            match_threshold: default_match_threshold(),
            max_attempts: default_max_attempts(),
            retry_delay_ms: default_retry_delay_ms(),
            amplify_token: None,
            gcal_token: None,
        }
    }
}

impl Config {
    /// Return the standard configuration directory depending on the platform
    pub fn config_dir() -> PathBuf {
        if cfg!(target_os = "windows") {
            let appdata = env::var("APPDATA").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(appdata).join("starpass")
        } else {
            let home = env::var("HOME").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(home).join(".starpass")
        }
    }

    /// Return the full path of the config file
    pub fn config_file() -> PathBuf {
        Self::config_dir().join("starpass.conf")
    }

    /// Load configuration from `path`, or defaults if the file does not exist.
    /// Environment overrides and secrets are applied on top.
    pub fn load(path: &Path) -> AppResult<Self> {
        let mut cfg = if path.exists() {
            let content = fs::read_to_string(path)?;
            serde_yaml::from_str::<Config>(&content).map_err(|e| {
                AppError::Config(format!("failed to parse {}: {e}", path.display()))
            })?
        } else {
            Config::default()
        };

        cfg.apply_env();
        cfg.check()?;
        Ok(cfg)
    }

    fn apply_env(&mut self) {
        self.amplify_token = non_empty_var("AMPLIFY_TOKEN");
        self.gcal_token = non_empty_var("GCAL_TOKEN");

        if let Some(url) = non_empty_var("BASE_AMPLIFY_URL") {
            self.api_base_url = url;
        }
        if let Some(url) = non_empty_var("BASE_GCAL_URL") {
            self.gcal_base_url = url;
        }
        if let Some(timeout) = non_empty_var("HTTP_TIMEOUT").and_then(|t| t.parse().ok()) {
            self.http_timeout = timeout;
        }
    }

    fn check(&self) -> AppResult<()> {
        if self.match_threshold > 100 {
            return Err(AppError::Config(format!(
                "match_threshold must be between 0 and 100, got {}",
                self.match_threshold
            )));
        }
        if self.max_attempts == 0 {
            return Err(AppError::Config("max_attempts must be at least 1".into()));
        }
        Ok(())
    }

    /// Write the default configuration file. Returns false when it already exists.
    pub fn init(path: &Path) -> AppResult<bool> {
        if path.exists() {
            return Ok(false);
        }
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir)?;
        }

        let yaml = serde_yaml::to_string(&Config::default())?;
        let mut file = fs::File::create(path)?;
        file.write_all(yaml.as_bytes())?;
        success(format!("Config file: {}", path.display()));

        Ok(true)
    }

    pub fn require_amplify_token(&self) -> AppResult<&str> {
        self.amplify_token
            .as_deref()
            .ok_or(AppError::MissingSecret("AMPLIFY_TOKEN"))
    }

    pub fn require_gcal_token(&self) -> AppResult<&str> {
        self.gcal_token
            .as_deref()
            .ok_or(AppError::MissingSecret("GCAL_TOKEN"))
    }
}

fn non_empty_var(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.trim().is_empty())
}
