use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;
use url::Url;

#[derive(Error, Debug, PartialEq)]
pub enum ValidationError {
    #[error("Port cannot be 0")]
    InvalidPort,

    #[error("photos service URL is not configured")]
    MissingPhotosServiceUrl,

    #[error("photos service URL must use http or https, got {0}")]
    UnsupportedScheme(String),

    #[error("{0} must be greater than 0")]
    ZeroTimeout(&'static str),
}

/// Network listener configuration
#[derive(Clone, Deserialize, Debug, PartialEq)]
pub struct Listener {
    pub host: String,
    pub port: u16,
}

impl Default for Listener {
    fn default() -> Self {
        Listener {
            host: "0.0.0.0".into(),
            port: 8080,
        }
    }
}

impl Listener {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.port == 0 {
            return Err(ValidationError::InvalidPort);
        }
        Ok(())
    }

    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Where the photos service lives and how long to wait for it.
#[derive(Clone, Deserialize, Debug, PartialEq)]
#[serde(default)]
pub struct PhotosService {
    /// Base URL; requests go to `{url}/albums/{id}/photos`.
    pub url: Option<Url>,
    pub connect_timeout_secs: u64,
    pub request_timeout_secs: u64,
}

impl Default for PhotosService {
    fn default() -> Self {
        PhotosService {
            url: None,
            connect_timeout_secs: 5,
            request_timeout_secs: 30,
        }
    }
}

impl PhotosService {
    pub fn validate(&self) -> Result<(), ValidationError> {
        let url = self
            .url
            .as_ref()
            .ok_or(ValidationError::MissingPhotosServiceUrl)?;

        if !matches!(url.scheme(), "http" | "https") {
            return Err(ValidationError::UnsupportedScheme(url.scheme().to_string()));
        }
        if self.connect_timeout_secs == 0 {
            return Err(ValidationError::ZeroTimeout("connect_timeout_secs"));
        }
        if self.request_timeout_secs == 0 {
            return Err(ValidationError::ZeroTimeout("request_timeout_secs"));
        }
        Ok(())
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

#[derive(Clone, Deserialize, Debug, Default, PartialEq)]
#[serde(default)]
pub struct Config {
    pub listener: Listener,
    /// Health and readiness endpoints. Disabled when not configured.
    pub admin_listener: Option<Listener>,
    pub photos_service: PhotosService,
}

impl Config {
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.listener.validate()?;
        if let Some(admin) = &self.admin_listener {
            admin.validate()?;
        }
        self.photos_service.validate()
    }
}
