use serde::{Deserialize, Serialize};

pub type AlbumId = i64;

/// A photo as returned by the photos service. Unknown fields are ignored and
/// missing ones stay `None`, which is written back out as `null`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Photo {
    pub id: Option<i64>,
    pub title: Option<String>,
    pub url: Option<String>,
    pub thumbnail_url: Option<String>,
}

impl Photo {
    pub fn new<T, U, V>(id: i64, title: T, url: U, thumbnail_url: V) -> Self
    where
        T: Into<String>,
        U: Into<String>,
        V: Into<String>,
    {
        Photo {
            id: Some(id),
            title: Some(title.into()),
            url: Some(url.into()),
            thumbnail_url: Some(thumbnail_url.into()),
        }
    }
}

/// `photos` is `None` when the upstream answered with an empty body or `null`,
/// and serializes as `null` rather than being skipped.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Album {
    pub album_id: AlbumId,
    pub photos: Option<Vec<Photo>>,
}
