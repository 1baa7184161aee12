// src/environment.rs
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::net::IpAddr;
use std::path::{Path, PathBuf};

pub const DEFAULT_CONFIG_FILE: &str = "config.yaml";
pub const DEFAULT_LOG_FILTER: &str = "payout_calculator=info,rocket::server=off";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnvironmentConfig {
    pub address: IpAddr,
    pub port: u16,
    pub log_filter: String,
    /// JSON log file, in addition to the console output.
    pub log_file: Option<PathBuf>,
    pub cors_origin: String,
}

impl Default for EnvironmentConfig {
    fn default() -> Self {
        Self {
            address: IpAddr::from([127, 0, 0, 1]),
            port: 8000,
            log_filter: DEFAULT_LOG_FILTER.to_string(),
            log_file: None,
            cors_origin: "*".to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct ConfigFile {
    #[serde(default)]
    local: EnvironmentConfig,
    #[serde(default)]
    production: EnvironmentConfig,
}

impl EnvironmentConfig {
    /// Load `config_path`, falling back to defaults when it is absent, then
    /// apply environment overrides.
    pub fn load_from(config_path: &Path) -> Result<Self> {
        let environment = Self::get_environment();

        let config = if config_path.exists() {
            let content = std::fs::read_to_string(config_path)
                .with_context(|| format!("Failed to read {}", config_path.display()))?;
            Self::from_yaml(&content, &environment)
                .with_context(|| format!("Failed to parse {}", config_path.display()))?
        } else {
            Self::default()
        };

        config.with_env_overrides()
    }

    pub fn get_environment() -> String {
        std::env::var("PAYOUT_ENV")
            .or_else(|_| std::env::var("ENVIRONMENT"))
            .or_else(|_| std::env::var("ENV"))
            .unwrap_or_else(|_| "local".to_string())
    }

    /// Select the section for `environment` from a YAML document.
    pub fn from_yaml(content: &str, environment: &str) -> Result<Self> {
        let config_file: ConfigFile =
            serde_yaml::from_str(content).context("Invalid configuration YAML")?;

        Ok(match environment {
            "production" => config_file.production,
            _ => config_file.local,
        })
    }

    fn with_env_overrides(mut self) -> Result<Self> {
        if let Ok(port) = std::env::var("ROCKET_PORT").or_else(|_| std::env::var("PORT")) {
            self.port = port
                .parse::<u16>()
                .with_context(|| format!("Port must be a valid port number, got '{}'", port))?;
        }

        if let Ok(address) = std::env::var("ROCKET_ADDRESS") {
            self.address = address
                .parse::<IpAddr>()
                .with_context(|| format!("Invalid bind address '{}'", address))?;
        }

        if let Ok(filter) = std::env::var("RUST_LOG") {
            self.log_filter = filter;
        }

        Ok(self)
    }
}

impl fmt::Display for EnvironmentConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{} (log filter '{}', CORS origin '{}')",
            self.address, self.port, self.log_filter, self.cors_origin
        )?;
        if let Some(path) = &self.log_file {
            write!(f, ", JSON log at {}", path.display())?;
        }
        Ok(())
    }
}
