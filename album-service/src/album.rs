use crate::photos_client::{PhotosClient, UpstreamError};
use crate::types::{Album, AlbumId, Photo};
use std::sync::Arc;

impl Album {
    /// Joins the requested id with whatever the photos service returned.
    /// The id always comes from the request, never from the photo data.
    pub fn assemble(album_id: AlbumId, photos: Option<Vec<Photo>>) -> Self {
        Album { album_id, photos }
    }
}

/// Builds albums from a [`PhotosClient`].
#[derive(Clone)]
pub struct AlbumService {
    photos: Arc<dyn PhotosClient>,
}

impl AlbumService {
    pub fn new(photos: Arc<dyn PhotosClient>) -> Self {
        AlbumService { photos }
    }

    pub async fn get_album(&self, album_id: AlbumId) -> Result<Album, UpstreamError> {
        let photos = self.photos.fetch(album_id).await?;
        Ok(Album::assemble(album_id, photos))
    }
}
