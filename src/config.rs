//! Configuration management for the resume tailor

use crate::error::{Result, ResumeTailorError};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Environment variable that overrides the configured backend URL.
pub const BACKEND_URL_ENV: &str = "RESUME_TAILOR_BACKEND_URL";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub api: ApiConfig,
    #[serde(default)]
    pub session: SessionConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Backend root; the client appends `/api` to it.
    pub backend_url: String,
    pub timeout_secs: u64,
    /// Set from the environment or the command line for this run only.
    #[serde(skip)]
    backend_url_override: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SessionConfig {
    pub session_id: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub format: OutputFormat,
    pub color_output: bool,
    pub download_dir: PathBuf,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OutputFormat {
    Console,
    Json,
    Markdown,
    Html,
}

impl Default for Config {
    fn default() -> Self {
        let download_dir = dirs::download_dir()
            .or_else(dirs::home_dir)
            .unwrap_or_else(|| PathBuf::from("."));

        Self {
            api: ApiConfig {
                backend_url: "http://localhost:8001".to_string(),
                timeout_secs: 120,
                backend_url_override: None,
            },
            session: SessionConfig::default(),
            output: OutputConfig {
                format: OutputFormat::Console,
                color_output: true,
                download_dir,
            },
        }
    }
}

impl Config {
    /// Load from `config_path`, creating it with defaults on first run.
    pub fn load_from(config_path: &Path) -> Result<Self> {
        let mut config = if config_path.exists() {
            let content = std::fs::read_to_string(config_path)?;
            toml::from_str::<Config>(&content)
                .map_err(|e| ResumeTailorError::Configuration(format!("Failed to parse config: {}", e)))?
        } else {
            let config = Self::default();
            config.save_to(config_path)?;
            config
        };

        if let Ok(url) = std::env::var(BACKEND_URL_ENV) {
            if !url.trim().is_empty() {
                log::debug!("Backend URL overridden by {}", BACKEND_URL_ENV);
                config.override_backend_url(&url)?;
            }
        }

        Ok(config)
    }

    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)
            .map_err(|e| ResumeTailorError::Configuration(format!("Failed to serialize config: {}", e)))?;

        std::fs::write(config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")))
            .join("resume-tailor")
            .join("config.toml")
    }

    /// Backend URL in effect: the override if one is set, else the saved value.
    pub fn backend_url(&self) -> &str {
        self.api
            .backend_url_override
            .as_deref()
            .unwrap_or(&self.api.backend_url)
    }

    /// Point this run at another backend without touching the saved value.
    pub fn override_backend_url(&mut self, url: &str) -> Result<()> {
        self.api.backend_url_override = Some(validate_backend_url(url)?);
        Ok(())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.api.timeout_secs)
    }

    /// Set a value addressed by a dotted key, e.g. `api.backend_url`.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "api.backend_url" => {
                self.api.backend_url = validate_backend_url(value)?;
            }
            "api.timeout_secs" => {
                let secs: u64 = value.parse().map_err(|_| {
                    ResumeTailorError::Configuration(format!("Invalid timeout: {}", value))
                })?;
                if secs == 0 {
                    return Err(ResumeTailorError::Configuration(
                        "Timeout must be at least one second".to_string(),
                    ));
                }
                self.api.timeout_secs = secs;
            }
            "session.session_id" => {
                let id = value.trim();
                self.session.session_id = if id.is_empty() { None } else { Some(id.to_string()) };
            }
            "output.format" => {
                self.output.format = crate::cli::parse_output_format(value)
                    .map_err(ResumeTailorError::Configuration)?;
            }
            "output.color_output" => {
                self.output.color_output = value.parse().map_err(|_| {
                    ResumeTailorError::Configuration(format!("Expected true or false, got '{}'", value))
                })?;
            }
            "output.download_dir" => {
                self.output.download_dir = PathBuf::from(value);
            }
            _ => {
                return Err(ResumeTailorError::Configuration(format!(
                    "Unknown configuration key: {}",
                    key
                )))
            }
        }
        Ok(())
    }
}

fn validate_backend_url(value: &str) -> Result<String> {
    let url = value.trim().trim_end_matches('/');
    if !(url.starts_with("http://") || url.starts_with("https://")) {
        return Err(ResumeTailorError::Configuration(format!(
            "Backend URL must start with http:// or https://, got '{}'",
            value
        )));
    }
    Ok(url.to_string())
}
