use axum::{
    extract::{Path, State},
    Json,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::service::DashboardError;
use super::state::ViewState;
use crate::presentation::{DashboardView, Theme};
use crate::AppState;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

/// Health check endpoint
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Raw view state
///
/// GET /api/v1/state
pub async fn get_state(State(state): State<AppState>) -> Json<ViewState> {
    Json(state.dashboard.snapshot())
}

/// Presentation-ready dashboard
///
/// GET /api/v1/dashboard
pub async fn get_dashboard(State(state): State<AppState>) -> Json<DashboardView> {
    let snapshot = state.dashboard.snapshot();
    Json(DashboardView::from(&snapshot))
}

/// Refresh now; the front end calls this when the page becomes visible again
///
/// POST /api/v1/refresh
pub async fn refresh(State(state): State<AppState>) -> Json<ViewState> {
    tracing::info!("Refresh requested");
    Json(state.dashboard.refresh().await)
}

/// Select the day shown in the hourly row
///
/// PUT /api/v1/selection/{date}
pub async fn select_day(
    State(state): State<AppState>,
    Path(date): Path<NaiveDate>,
) -> Result<Json<ViewState>, DashboardError> {
    Ok(Json(state.dashboard.select_day(date)?))
}

/// Theme for the current season and time of day
///
/// GET /api/v1/theme
pub async fn get_theme(State(state): State<AppState>) -> Json<Theme> {
    let snapshot = state.dashboard.snapshot();
    Json(Theme::for_moment(snapshot.season, snapshot.time_of_day))
}
