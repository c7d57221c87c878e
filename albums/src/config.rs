use album_service::config::{Config as AlbumServiceConfig, ValidationError};
use serde::Deserialize;
use std::fs::File;
use std::path::Path;
use url::Url;

/// Overrides `photos_service.url`.
pub const PHOTOS_SERVICE_URL_ENV: &str = "PHOTOS_SERVICE_URL";
/// Overrides `listener.port`.
pub const PORT_ENV: &str = "PORT";

#[derive(Deserialize, Debug, PartialEq)]
pub struct MetricsConfig {
    pub statsd_host: String,
    pub statsd_port: u16,
}

#[derive(Clone, Copy, Deserialize, Debug, Default, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

#[derive(Deserialize, Debug, PartialEq)]
#[serde(default)]
pub struct LoggingConfig {
    /// `EnvFilter` directives; `RUST_LOG` takes precedence.
    pub level: String,
    pub format: LogFormat,
    pub sentry_dsn: Option<String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        LoggingConfig {
            level: "info".into(),
            format: LogFormat::Text,
            sentry_dsn: None,
        }
    }
}

#[derive(Deserialize, Debug, Default, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub metrics: Option<MetricsConfig>,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(flatten)]
    pub service: AlbumServiceConfig,
}

impl Config {
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let file = File::open(path)?;
        let data = serde_yaml::from_reader(file)?;

        Ok(data)
    }

    /// Reads the optional config file, applies environment overrides and
    /// validates the result. A missing photos service URL is an error.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        config.apply_env(|key| std::env::var(key).ok())?;
        config.service.validate()?;

        Ok(config)
    }

    pub fn apply_env<F>(&mut self, var: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = var(PHOTOS_SERVICE_URL_ENV) {
            let url = Url::parse(&url).map_err(|e| ConfigError::InvalidEnv {
                key: PHOTOS_SERVICE_URL_ENV,
                reason: e.to_string(),
            })?;
            self.service.photos_service.url = Some(url);
        }

        if let Some(port) = var(PORT_ENV) {
            self.service.listener.port = port.parse().map_err(|e: std::num::ParseIntError| {
                ConfigError::InvalidEnv {
                    key: PORT_ENV,
                    reason: e.to_string(),
                }
            })?;
        }

        Ok(())
    }
}

#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("could not load config from file: {0}")]
    LoadError(#[from] std::io::Error),
    #[error("could not parse config: {0}")]
    ParseError(#[from] serde_yaml::Error),
    #[error("invalid value for {key}: {reason}")]
    InvalidEnv { key: &'static str, reason: String },
    #[error("invalid config: {0}")]
    Invalid(#[from] ValidationError),
}
