use crate::photos_client::{PhotosClient, UpstreamError};
use crate::types::{AlbumId, Photo};
use async_trait::async_trait;
use reqwest::StatusCode;
use std::sync::{Arc, Mutex};

#[derive(Clone)]
enum Outcome {
    Photos(Option<Vec<Photo>>),
    Status(StatusCode),
}

/// In-memory photos client that answers every album with the same outcome
/// and remembers which albums were asked for.
#[derive(Clone)]
pub struct StubPhotosClient {
    outcome: Outcome,
    requested: Arc<Mutex<Vec<AlbumId>>>,
}

impl StubPhotosClient {
    pub fn returning(photos: Option<Vec<Photo>>) -> Self {
        Self::with_outcome(Outcome::Photos(photos))
    }

    pub fn failing(status: StatusCode) -> Self {
        Self::with_outcome(Outcome::Status(status))
    }

    fn with_outcome(outcome: Outcome) -> Self {
        StubPhotosClient {
            outcome,
            requested: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn requested(&self) -> Vec<AlbumId> {
        self.requested.lock().unwrap().clone()
    }
}

#[async_trait]
impl PhotosClient for StubPhotosClient {
    async fn fetch(&self, album_id: AlbumId) -> Result<Option<Vec<Photo>>, UpstreamError> {
        self.requested.lock().unwrap().push(album_id);
        match &self.outcome {
            Outcome::Photos(photos) => Ok(photos.clone()),
            Outcome::Status(status) => Err(UpstreamError::Status(*status)),
        }
    }
}
