mod config;
mod logging;
mod statsd;

use clap::Parser;
use config::Config;
use std::path::PathBuf;
use std::process;

/// Serves albums assembled from the photos service.
#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// YAML config file. PHOTOS_SERVICE_URL and PORT override its values.
    #[arg(long, env = "ALBUMS_CONFIG")]
    config_file: Option<PathBuf>,
}

fn main() {
    let cli = Cli::parse();

    let config = match Config::load(cli.config_file.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{e}");
            process::exit(1);
        }
    };

    let _sentry = logging::init(&config.logging);

    if let Some(metrics_config) = &config.metrics {
        if let Err(e) = statsd::init(metrics_config) {
            tracing::error!(error = %e, "could not initialise metrics");
            process::exit(1);
        }
    }

    let rt = match tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
    {
        Ok(rt) => rt,
        Err(e) => {
            tracing::error!(error = %e, "could not start tokio runtime");
            process::exit(1);
        }
    };

    tracing::info!("Starting album service");
    if let Err(e) = rt.block_on(album_service::run(config.service)) {
        tracing::error!(error = %e, "album service failed");
        process::exit(1);
    }
}
