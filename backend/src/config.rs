//! Application configuration file support.
//!
//! Settings are read from a TOML file (`audit.toml`) and can be partially
//! overridden through environment variables. Every setting has a default, so an
//! empty or missing file yields a working configuration.

use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::error::{AuditError, AuditResult};
use crate::models::ZeroTimestamp;
use crate::services::insights::InsightThresholds;

/// Environment variable pointing at an explicit configuration file.
pub const CONFIG_PATH_ENV: &str = "AUDIT_CONFIG";

/// Top-level application configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub metrics: MetricsSettings,
    #[serde(default)]
    pub insights: InsightsSettings,
}

/// HTTP server settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    /// Largest accepted audit upload in bytes
    #[serde(default = "default_max_upload_bytes")]
    pub max_upload_bytes: usize,
}

/// How metrics read the raw events.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MetricsSettings {
    #[serde(default)]
    pub zero_timestamp: ZeroTimestamp,
}

/// Thresholds for the insights report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InsightsSettings {
    #[serde(default = "default_time_outlier_threshold_secs")]
    pub time_outlier_threshold_secs: f64,
    #[serde(default = "default_change_threshold")]
    pub change_threshold: u32,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_max_upload_bytes() -> usize {
    50 * 1024 * 1024
}

fn default_time_outlier_threshold_secs() -> f64 {
    4.0
}

fn default_change_threshold() -> u32 {
    2
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            max_upload_bytes: default_max_upload_bytes(),
        }
    }
}

impl Default for InsightsSettings {
    fn default() -> Self {
        Self {
            time_outlier_threshold_secs: default_time_outlier_threshold_secs(),
            change_threshold: default_change_threshold(),
        }
    }
}

impl FromStr for AppConfig {
    type Err = AuditError;

    fn from_str(content: &str) -> Result<Self, Self::Err> {
        let config: AppConfig = toml::from_str(content).map_err(|e| {
            AuditError::Configuration(format!("Failed to parse config file: {}", e))
        })?;
        config.validate()?;
        Ok(config)
    }
}

impl AppConfig {
    /// Load configuration from a TOML file.
    ///
    /// # Arguments
    /// * `path` - Path to the configuration file
    ///
    /// # Returns
    /// * `Ok(AppConfig)` if successful
    /// * `Err(AuditError)` if file cannot be read or parsed
    pub fn from_file<P: AsRef<Path>>(path: P) -> AuditResult<Self> {
        let content =
            fs::read_to_string(path.as_ref()).map_err(|e| AuditError::io(path.as_ref(), e))?;
        content.parse()
    }

    /// Find `audit.toml` in the standard locations.
    ///
    /// Searches:
    /// 1. Current directory
    /// 2. `backend/` directory
    /// 3. Parent directory
    pub fn find_default_location() -> Option<PathBuf> {
        [
            PathBuf::from("audit.toml"),
            PathBuf::from("backend/audit.toml"),
            PathBuf::from("../audit.toml"),
        ]
        .into_iter()
        .find(|path| path.exists())
    }

    /// Load configuration the way the binaries do.
    ///
    /// Uses the file named by `AUDIT_CONFIG` if set, else the first file found
    /// in the standard locations, else defaults. `HOST` and `PORT` override the
    /// server settings.
    pub fn load() -> AuditResult<Self> {
        let mut config = match env::var(CONFIG_PATH_ENV) {
            Ok(path) => Self::from_file(path)?,
            Err(_) => match Self::find_default_location() {
                Some(path) => Self::from_file(path)?,
                None => Self::default(),
            },
        };

        config.apply_overrides(env::var("HOST").ok(), env::var("PORT").ok())?;
        Ok(config)
    }

    /// Apply host/port overrides given as raw strings.
    pub fn apply_overrides(&mut self, host: Option<String>, port: Option<String>) -> AuditResult<()> {
        if let Some(host) = host {
            self.server.host = host;
        }
        if let Some(port) = port {
            self.server.port = port
                .parse()
                .map_err(|_| AuditError::Configuration("PORT must be a valid port number".to_string()))?;
        }
        Ok(())
    }

    fn validate(&self) -> AuditResult<()> {
        let threshold = self.insights.time_outlier_threshold_secs;
        if !threshold.is_finite() || threshold < 0.0 {
            return Err(AuditError::Configuration(
                "insights.time_outlier_threshold_secs must be a non-negative number".to_string(),
            ));
        }
        if self.server.max_upload_bytes == 0 {
            return Err(AuditError::Configuration(
                "server.max_upload_bytes must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }

    pub fn insight_thresholds(&self) -> InsightThresholds {
        InsightThresholds {
            time_outlier_secs: self.insights.time_outlier_threshold_secs,
            min_changes: self.insights.change_threshold,
        }
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}
