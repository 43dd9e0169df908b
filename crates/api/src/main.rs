use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use wander_amadeus::{AmadeusClient, UnconfiguredAmadeus};
use wander_api::config::{LogFormat, ServerConfig};
use wander_api::router::build_app_router;
use wander_api::state::AppState;
use wander_core::catalog::Catalog;
use wander_core::provider::LiveProvider;
use wander_openweather::OpenWeatherClient;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // --- Configuration ---
    let config = ServerConfig::from_env().context("Failed to load configuration")?;

    // --- Tracing ---
    init_tracing(config.log_format);
    tracing::info!(host = %config.host, port = %config.port, "Loaded server configuration");

    // --- Static data ---
    let catalog = Catalog::load_dir(&config.data_dir)
        .with_context(|| format!("Failed to load static data from {}", config.data_dir.display()))?;
    tracing::info!(dir = %config.data_dir.display(), summary = ?catalog.summary(), "Static data loaded");

    // --- Providers ---
    let live: Arc<dyn LiveProvider> = match &config.amadeus {
        Some(amadeus) => Arc::new(
            AmadeusClient::new(amadeus.clone()).context("Failed to build Amadeus client")?,
        ),
        None => {
            tracing::warn!("Amadeus credentials not set, live travel/hotel/check-in lookups will fail");
            Arc::new(UnconfiguredAmadeus)
        }
    };

    let weather = Arc::new(
        OpenWeatherClient::new(
            &config.weather.base_url,
            config.weather.api_key.clone(),
            config.upstream_timeout(),
        )
        .context("Failed to build weather client")?,
    );

    // --- Router ---
    let state = AppState::new(catalog, live, weather);
    let app = build_app_router(state, &config);

    // --- Start server ---
    let ip = config
        .host
        .parse::<std::net::IpAddr>()
        .with_context(|| format!("Invalid HOST address '{}'", config.host))?;
    let addr = SocketAddr::new(ip, config.port);
    tracing::info!(%addr, "Starting server");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind to {addr}"))?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    tracing::info!("Graceful shutdown complete");
    Ok(())
}

fn init_tracing(format: LogFormat) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "wander_api=debug,tower_http=debug".into());

    let registry = tracing_subscriber::registry().with(filter);
    match format {
        LogFormat::Json => registry.with(tracing_subscriber::fmt::layer().json()).init(),
        LogFormat::Pretty => registry.with(tracing_subscriber::fmt::layer()).init(),
    }
}

/// Wait for a termination signal to initiate graceful shutdown.
///
/// Handles both SIGINT (Ctrl-C) and SIGTERM (on Unix).
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl-C handler");
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
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received SIGINT (Ctrl-C), starting graceful shutdown");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown");
        }
    }
}
