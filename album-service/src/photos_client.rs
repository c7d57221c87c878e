use crate::metrics_defs::{PHOTOS_FETCH_DURATION, PHOTOS_FETCH_FAILED};
use crate::types::{AlbumId, Photo};
use async_trait::async_trait;
use reqwest::StatusCode;
use reqwest::header::ACCEPT;
use shared::{counter, histogram};
use std::time::{Duration, Instant};

/// Any failure to obtain a photo list. Callers treat every variant the same;
/// the variants only exist for logs and metric labels.
#[derive(thiserror::Error, Debug)]
pub enum UpstreamError {
    #[error("photos service request failed: {0}")]
    Transport(#[source] reqwest::Error),
    #[error("photos service timed out: {0}")]
    Timeout(#[source] reqwest::Error),
    #[error("photos service responded with {0}")]
    Status(StatusCode),
    #[error("could not decode photos: {0}")]
    Decode(#[from] serde_json::Error),
}

impl From<reqwest::Error> for UpstreamError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            UpstreamError::Timeout(e)
        } else {
            UpstreamError::Transport(e)
        }
    }
}

impl UpstreamError {
    pub fn reason(&self) -> &'static str {
        match self {
            UpstreamError::Transport(_) => "transport",
            UpstreamError::Timeout(_) => "timeout",
            UpstreamError::Status(_) => "status",
            UpstreamError::Decode(_) => "decode",
        }
    }
}

/// Source of the photos belonging to an album.
///
/// `Ok(None)` means the upstream had nothing to say (empty body or `null`),
/// which is not the same as `Ok(Some(vec![]))`.
#[async_trait]
pub trait PhotosClient: Send + Sync {
    async fn fetch(&self, album_id: AlbumId) -> Result<Option<Vec<Photo>>, UpstreamError>;
}

/// Calls `GET {base_url}/albums/{album_id}/photos` on the photos service.
/// Never retries.
#[derive(Clone, Debug)]
pub struct HttpPhotosClient {
    client: reqwest::Client,
    base_url: String,
}

impl HttpPhotosClient {
    pub fn new(
        base_url: &str,
        connect_timeout: Duration,
        request_timeout: Duration,
    ) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .connect_timeout(connect_timeout)
            .timeout(request_timeout)
            .build()?;

        Ok(HttpPhotosClient {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn photos_url(&self, album_id: AlbumId) -> String {
        format!("{}/albums/{}/photos", self.base_url, album_id)
    }

    async fn request(&self, url: &str) -> Result<Option<Vec<Photo>>, UpstreamError> {
        let response = self
            .client
            .get(url)
            .header(ACCEPT, "application/json")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(UpstreamError::Status(status));
        }

        let body = response.bytes().await?;
        Ok(decode_photos(&body)?)
    }
}

#[async_trait]
impl PhotosClient for HttpPhotosClient {
    async fn fetch(&self, album_id: AlbumId) -> Result<Option<Vec<Photo>>, UpstreamError> {
        let url = self.photos_url(album_id);
        let started = Instant::now();
        let result = self.request(&url).await;
        histogram!(PHOTOS_FETCH_DURATION).record(started.elapsed().as_secs_f64());

        match &result {
            Ok(photos) => tracing::debug!(
                album_id,
                count = photos.as_ref().map(Vec::len),
                "fetched photos"
            ),
            Err(e) => {
                counter!(PHOTOS_FETCH_FAILED, "reason" => e.reason()).increment(1);
                tracing::warn!(album_id, %url, error = %e, "photos service call failed");
            }
        }

        result
    }
}

// An empty (or whitespace only) body is treated like `null`.
fn decode_photos(body: &[u8]) -> Result<Option<Vec<Photo>>, serde_json::Error> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(None);
    }
    serde_json::from_slice(body)
}
