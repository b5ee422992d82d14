use axum::{
    routing::{get, post, put},
    Router,
};

use crate::dashboard::handlers as dashboard_handlers;
use crate::forecast::handlers as forecast_handlers;
use crate::openapi::swagger_ui;
use crate::AppState;

/// Build the dashboard API routes
fn dashboard_routes() -> Router<AppState> {
    Router::new()
        .route("/state", get(dashboard_handlers::get_state))
        .route("/dashboard", get(dashboard_handlers::get_dashboard))
        .route("/theme", get(dashboard_handlers::get_theme))
        .route("/refresh", post(dashboard_handlers::refresh))
        .route("/selection/{date}", put(dashboard_handlers::select_day))
}

/// Build the forecast API routes
fn forecast_routes() -> Router<AppState> {
    Router::new()
        .route("/forecast", get(forecast_handlers::get_forecast))
        .route("/forecast/{date}", get(forecast_handlers::get_forecast_day))
}

/// Build all API v1 routes
pub fn api_v1_routes() -> Router<AppState> {
    Router::new()
        .merge(dashboard_routes())
        .merge(forecast_routes())
}

/// Build the complete application router
pub fn build_router() -> Router<AppState> {
    Router::new()
        // Health check at root level
        .route("/", get(dashboard_handlers::health))
        .route("/health", get(dashboard_handlers::health))
        .nest("/api/v1", api_v1_routes())
        // Swagger UI for API documentation
        .merge(swagger_ui())
}
