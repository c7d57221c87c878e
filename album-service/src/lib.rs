pub mod album;
pub mod api;
pub mod config;
pub mod metrics_defs;
pub mod photos_client;
#[cfg(test)]
mod testutils;
pub mod types;

use album::AlbumService;
use photos_client::HttpPhotosClient;
use shared::admin_service::AdminService;
use shared::http::run_http_service;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::net::TcpListener;

#[derive(thiserror::Error, Debug)]
pub enum AlbumServiceError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid configuration: {0}")]
    Config(#[from] config::ValidationError),
    #[error("could not build photos service client: {0}")]
    Client(#[from] reqwest::Error),
}

/// Runs the album API (and the admin listener, if configured) until a
/// shutdown signal is received.
pub async fn run(config: config::Config) -> Result<(), AlbumServiceError> {
    config.validate()?;

    let photos_config = &config.photos_service;
    let photos_url = photos_config
        .url
        .as_ref()
        .ok_or(config::ValidationError::MissingPhotosServiceUrl)?;

    let client = HttpPhotosClient::new(
        photos_url.as_str(),
        photos_config.connect_timeout(),
        photos_config.request_timeout(),
    )?;
    let albums = AlbumService::new(Arc::new(client));

    let ready = Arc::new(AtomicBool::new(false));

    let listener = TcpListener::bind(config.listener.addr()).await?;
    tracing::info!(
        addr = %config.listener.addr(),
        photos_service = %photos_url,
        "album service listening"
    );
    ready.store(true, Ordering::Relaxed);

    let api_task = api::serve(listener, albums, shutdown_signal());

    match config.admin_listener {
        Some(admin) => {
            tracing::info!(addr = %admin.addr(), "admin listener starting");
            let is_ready = move || ready.load(Ordering::Relaxed);
            let admin_task = run_http_service::<_, AlbumServiceError>(
                &admin.host,
                admin.port,
                AdminService::new(is_ready),
            );

            // The admin loop only ends on error; the API ends on shutdown.
            tokio::select! {
                res = api_task => res?,
                res = admin_task => res?,
            }
        }
        None => api_task.await?,
    }

    tracing::info!("album service stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("shutdown signal received");
}
