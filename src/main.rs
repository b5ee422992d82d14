mod classify;
mod config;
mod dashboard;
mod error;
mod forecast;
mod openapi;
mod presentation;
mod provider;
mod routes;
mod weather;

use axum::{error_handling::HandleErrorLayer, http::StatusCode, BoxError};
use reqwest::Client;
use std::{sync::Arc, time::Duration};
use tokio::sync::watch;
use tower::ServiceBuilder;
use tower_http::{compression::CompressionLayer, cors::CorsLayer, trace::TraceLayer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::AppConfig;
use crate::dashboard::{DashboardService, RefreshScheduler, ViewState};
use crate::forecast::ForecastService;
use crate::provider::OpenWeatherMap;
use crate::weather::{ProviderSettings, WeatherService};

/// Shared HTTP client configuration
const HTTP_TIMEOUT_SECS: u64 = 30;
const HTTP_CONNECT_TIMEOUT_SECS: u64 = 5;
const HTTP_POOL_IDLE_TIMEOUT_SECS: u64 = 90;

#[derive(Clone)]
pub struct AppState {
    pub dashboard: Arc<DashboardService>,
}

/// Create shared HTTP client with connection pooling
fn create_http_client() -> Result<Client, reqwest::Error> {
    Client::builder()
        .timeout(Duration::from_secs(HTTP_TIMEOUT_SECS))
        .connect_timeout(Duration::from_secs(HTTP_CONNECT_TIMEOUT_SECS))
        .pool_idle_timeout(Duration::from_secs(HTTP_POOL_IDLE_TIMEOUT_SECS))
        .pool_max_idle_per_host(4)
        .build()
}

/// Handle request timeout errors
async fn handle_timeout_error(err: BoxError) -> (StatusCode, String) {
    if err.is::<tower::timeout::error::Elapsed>() {
        (StatusCode::REQUEST_TIMEOUT, "Request timed out".to_string())
    } else {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("Internal error: {}", err),
        )
    }
}

/// Log every snapshot the dashboard publishes
async fn log_state_changes(mut updates: watch::Receiver<ViewState>) {
    while updates.changed().await.is_ok() {
        let state = updates.borrow_and_update();
        tracing::debug!(
            days = state.daily_forecast.len(),
            selected = ?state.selected_date,
            loading = state.loading,
            season = ?state.season,
            time_of_day = ?state.time_of_day,
            error = ?state.error,
            "Dashboard state published"
        );
    }
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for ctrl+c");
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
                tracing::error!(error = %e, "Failed to listen for SIGTERM");
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

    tracing::info!("Shutdown signal received, starting graceful shutdown");
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "seasonsky=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = AppConfig::load()?;
    tracing::info!(
        city = %config.city,
        lang = %config.lang,
        timezone = %config.timezone,
        "Configuration loaded successfully"
    );

    let http_client = create_http_client()?;
    let settings = ProviderSettings {
        base_url: config.api_base_url.clone(),
        api_key: config.openweathermap_api_key.clone(),
        city: config.city.clone(),
        units: config.units.clone(),
        lang: config.lang.clone(),
    };

    let provider = Arc::new(OpenWeatherMap::new(
        WeatherService::new(http_client.clone(), settings.clone()),
        ForecastService::new(http_client, settings),
    ));

    let dashboard = Arc::new(DashboardService::new(
        provider,
        &config.city,
        &config.lang,
        config.tz(),
    ));

    // Initial load; failures leave an error in the state and the next tick retries
    let initial = dashboard.refresh().await;
    if initial.error.is_some() {
        tracing::warn!("Initial load failed, serving empty dashboard until next refresh");
    }

    let mut scheduler = RefreshScheduler::new().await?;
    scheduler
        .schedule(Arc::clone(&dashboard), &config.refresh)
        .await?;
    scheduler.start().await?;

    tokio::spawn(log_state_changes(dashboard.subscribe()));

    let state = AppState { dashboard };

    let app = routes::build_router()
        .layer(
            ServiceBuilder::new()
                // Handle timeout errors
                .layer(HandleErrorLayer::new(handle_timeout_error))
                // Refresh waits on two provider calls
                .timeout(Duration::from_secs(60)),
        )
        .layer(CompressionLayer::new())
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    // Start server with graceful shutdown
    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    scheduler.shutdown().await?;
    tracing::info!("Server shutdown complete");

    Ok(())
}
