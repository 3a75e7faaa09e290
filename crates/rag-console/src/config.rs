//! Configuration for the console client

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// Backend origin baked in at build time (`RAG_CONSOLE_BACKEND_URL`), else
/// the local development server
pub const DEFAULT_BACKEND_URL: &str = match option_env!("RAG_CONSOLE_BACKEND_URL") {
    Some(url) => url,
    None => "http://localhost:8000",
};

/// Environment variable that overrides the backend origin at run time
pub const BACKEND_URL_ENV: &str = "RAG_CONSOLE_BACKEND_URL";

/// Main console configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConsoleConfig {
    /// Backend connection
    #[serde(default)]
    pub backend: BackendConfig,
    /// Log output
    #[serde(default)]
    pub logging: LoggingConfig,
    /// Terminal rendering
    #[serde(default)]
    pub display: DisplayConfig,
}

/// Backend connection configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BackendConfig {
    /// Backend origin, e.g. `http://localhost:8000`
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
        }
    }
}

fn default_base_url() -> String {
    DEFAULT_BACKEND_URL.to_string()
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Level for this crate when `RUST_LOG` is unset
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "warn".to_string()
}

/// Display configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisplayConfig {
    /// Colour output
    #[serde(default = "default_color")]
    pub color: bool,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            color: default_color(),
        }
    }
}

fn default_color() -> bool {
    true
}

impl ConsoleConfig {
    /// Default config file location (`<config_dir>/rag-console/config.toml`)
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("rag-console").join("config.toml"))
    }

    /// Parse configuration from TOML text
    pub fn from_toml(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Load configuration from a file
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| {
            Error::config(format!("Cannot read config file {}: {}", path.display(), e))
        })?;
        Self::from_toml(&text)
    }

    /// Resolve configuration.
    ///
    /// An explicit path must exist. Without one, the default location is used
    /// when present, else built-in defaults. `RAG_CONSOLE_BACKEND_URL` then
    /// overrides the backend origin.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let mut config = match explicit {
            Some(path) => Self::from_file(path)?,
            None => match Self::default_path().filter(|p| p.is_file()) {
                Some(path) => {
                    tracing::debug!("Loading config from {}", path.display());
                    Self::from_file(&path)?
                }
                None => Self::default(),
            },
        };

        if let Ok(url) = std::env::var(BACKEND_URL_ENV) {
            if !url.trim().is_empty() {
                config.backend.base_url = url;
            }
        }

        config.validate()?;
        Ok(config)
    }

    /// Check values and normalise the backend origin
    pub fn validate(&mut self) -> Result<()> {
        let trimmed = self.backend.base_url.trim().trim_end_matches('/').to_string();
        let url = reqwest::Url::parse(&trimmed)
            .map_err(|e| Error::config(format!("Invalid backend URL '{}': {}", trimmed, e)))?;

        if !matches!(url.scheme(), "http" | "https") {
            return Err(Error::config(format!(
                "Backend URL must use http or https, got '{}'",
                url.scheme()
            )));
        }

        self.backend.base_url = trimmed;

        if self.logging.level.trim().is_empty() {
            self.logging.level = default_log_level();
        }

        Ok(())
    }
}
