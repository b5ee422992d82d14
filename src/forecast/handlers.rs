use axum::{
    extract::{Path, State},
    Json,
};
use chrono::NaiveDate;

use super::models::DaySummary;
use crate::dashboard::DashboardError;
use crate::AppState;

/// Daily summaries from the last successful refresh
///
/// GET /api/v1/forecast
pub async fn get_forecast(State(state): State<AppState>) -> Json<Vec<DaySummary>> {
    Json(state.dashboard.snapshot().daily_forecast)
}

/// One day, including its full hourly breakdown
///
/// GET /api/v1/forecast/{date}
pub async fn get_forecast_day(
    State(state): State<AppState>,
    Path(date): Path<NaiveDate>,
) -> Result<Json<DaySummary>, DashboardError> {
    state
        .dashboard
        .snapshot()
        .daily_forecast
        .into_iter()
        .find(|day| day.date == date)
        .map(Json)
        .ok_or(DashboardError::DayNotFound(date))
}
