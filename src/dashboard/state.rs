use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::classify::{Season, TimeOfDay};
use crate::forecast::DaySummary;
use crate::weather::CurrentConditions;

/// One immutable snapshot of everything the dashboard shows
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ViewState {
    pub city: String,
    /// None until the first successful refresh
    pub current_weather: Option<CurrentConditions>,
    pub daily_forecast: Vec<DaySummary>,
    /// Key into `daily_forecast`
    pub selected_date: Option<NaiveDate>,
    pub loading: bool,
    pub error: Option<String>,
    pub season: Season,
    pub time_of_day: TimeOfDay,
    /// Completion time of the last successful refresh
    pub updated_at: Option<DateTime<Utc>>,
}

impl ViewState {
    pub fn new(city: impl Into<String>, season: Season, time_of_day: TimeOfDay) -> Self {
        Self {
            city: city.into(),
            current_weather: None,
            daily_forecast: Vec::new(),
            selected_date: None,
            loading: false,
            error: None,
            season,
            time_of_day,
            updated_at: None,
        }
    }

    pub fn day(&self, date: NaiveDate) -> Option<&DaySummary> {
        self.daily_forecast.iter().find(|d| d.date == date)
    }

    pub fn selected_day(&self) -> Option<&DaySummary> {
        self.selected_date.and_then(|date| self.day(date))
    }
}

/// Carry a selection over to a freshly aggregated day list.
///
/// The previous date stays selected while it is still in the list; otherwise
/// the first day is selected, or nothing when the list is empty.
pub fn reconcile_selection(previous: Option<NaiveDate>, days: &[DaySummary]) -> Option<NaiveDate> {
    previous
        .filter(|date| days.iter().any(|d| d.date == *date))
        .or_else(|| days.first().map(|d| d.date))
}
