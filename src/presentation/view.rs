use chrono::{DateTime, Datelike, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::hourly::{hourly_row, HourSlot};
use super::icons::icon_name;
use super::theme::Theme;
use crate::dashboard::ViewState;
use crate::forecast::DaySummary;
use crate::weather::CurrentConditions;

/// Everything a front end needs to draw the dashboard
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct DashboardView {
    pub city: String,
    pub theme: Theme,
    pub current: Option<CurrentCard>,
    pub days: Vec<DayCard>,
    pub selected_date: Option<NaiveDate>,
    /// Always `HOURLY_SLOTS` wide; blank when no day is selected
    pub hourly: Vec<HourSlot>,
    pub loading: bool,
    pub error: Option<String>,
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct CurrentCard {
    pub conditions: CurrentConditions,
    pub icon: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct DayCard {
    pub date: NaiveDate,
    pub day_label: String,
    /// "M/D"
    pub short_date: String,
    pub icon: Option<String>,
    pub description: String,
    pub temp_max: i32,
    pub temp_min: i32,
    pub selected: bool,
}

impl DayCard {
    fn new(day: &DaySummary, selected: bool) -> Self {
        Self {
            date: day.date,
            day_label: day.day_label.clone(),
            short_date: format!("{}/{}", day.date.month(), day.date.day()),
            icon: icon_name(&day.condition_code).map(str::to_string),
            description: day.description.clone(),
            temp_max: day.temp_max,
            temp_min: day.temp_min,
            selected,
        }
    }
}

impl From<&ViewState> for DashboardView {
    fn from(state: &ViewState) -> Self {
        let hours = state
            .selected_day()
            .map(|day| day.hourly.as_slice())
            .unwrap_or_default();

        Self {
            city: state.city.clone(),
            theme: Theme::for_moment(state.season, state.time_of_day),
            current: state.current_weather.as_ref().map(|c| CurrentCard {
                icon: icon_name(&c.condition_code).map(str::to_string),
                conditions: c.clone(),
            }),
            days: state
                .daily_forecast
                .iter()
                .map(|day| DayCard::new(day, state.selected_date == Some(day.date)))
                .collect(),
            selected_date: state.selected_date,
            hourly: hourly_row(hours),
            loading: state.loading,
            error: state.error.clone(),
            updated_at: state.updated_at,
        }
    }
}
