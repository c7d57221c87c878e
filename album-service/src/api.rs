use crate::album::AlbumService;
use crate::metrics_defs::ALBUM_REQUESTS;
use crate::photos_client::UpstreamError;
use crate::types::{Album, AlbumId};
use axum::{
    Json, Router,
    extract::{Path, State, rejection::PathRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use serde::Serialize;
use shared::counter;
use std::future::Future;
use tokio::net::TcpListener;

#[derive(thiserror::Error, Debug)]
pub enum ApiError {
    #[error("invalid album id: {0}")]
    BadRequest(String),
    #[error(transparent)]
    Upstream(#[from] UpstreamError),
}

#[derive(Serialize)]
struct ApiErrorResponse {
    error_message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::BadRequest(reason) => {
                tracing::debug!(%reason, "rejected album request");
                StatusCode::BAD_REQUEST
            }
            ApiError::Upstream(e) => {
                tracing::warn!(error = %e, "could not assemble album");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        record_status(status);

        let body = Json(ApiErrorResponse {
            error_message: self.to_string(),
        });

        (status, body).into_response()
    }
}

pub fn router(albums: AlbumService) -> Router {
    Router::new()
        .route("/api/albums/{album_id}", get(get_album))
        .with_state(albums)
}

/// Serves the album API on `listener` until `shutdown` resolves.
pub async fn serve<F>(
    listener: TcpListener,
    albums: AlbumService,
    shutdown: F,
) -> std::io::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    axum::serve(listener, router(albums))
        .with_graceful_shutdown(shutdown)
        .await
}

async fn get_album(
    State(albums): State<AlbumService>,
    album_id: Result<Path<AlbumId>, PathRejection>,
) -> Result<Json<Album>, ApiError> {
    let Path(album_id) =
        album_id.map_err(|rejection| ApiError::BadRequest(rejection.body_text()))?;

    let album = albums.get_album(album_id).await?;
    record_status(StatusCode::OK);
    Ok(Json(album))
}

fn record_status(status: StatusCode) {
    counter!(ALBUM_REQUESTS, "status" => status.as_u16().to_string()).increment(1);
}
