use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::weather::models::{MainInfo, WeatherCondition, WindInfo};

// ============================================================================
// OpenWeatherMap 2.5 /forecast response (Internal)
// 5 days of readings at 3 hour spacing plus a city block
// ============================================================================

#[allow(dead_code)]
#[derive(Debug, Deserialize)]
pub struct ForecastPayload {
    pub cnt: u32,
    pub list: Vec<ForecastEntry>,
    pub city: CityInfo,
}

#[allow(dead_code)]
#[derive(Debug, Deserialize)]
pub struct ForecastEntry {
    pub dt: i64,
    pub main: MainInfo,
    pub weather: Vec<WeatherCondition>,
    pub wind: WindInfo,
    pub pop: Option<f64>,
    pub dt_txt: Option<String>,
}

#[allow(dead_code)]
#[derive(Debug, Deserialize)]
pub struct CityInfo {
    pub name: String,
    pub country: Option<String>,
    /// Shift in seconds from UTC
    pub timezone: Option<i32>,
    pub sunrise: Option<i64>,
    pub sunset: Option<i64>,
}

impl ForecastPayload {
    pub fn into_samples(self) -> Vec<RawForecastSample> {
        self.list.into_iter().map(RawForecastSample::from).collect()
    }
}

// ============================================================================
// Aggregation input
// ============================================================================

/// One provider reading at a single instant
#[derive(Debug, Clone, PartialEq)]
pub struct RawForecastSample {
    /// Seconds since the Unix epoch
    pub timestamp: i64,
    pub temperature: f64,
    pub feels_like: f64,
    pub temp_min: f64,
    pub temp_max: f64,
    pub humidity: u8,
    pub wind_speed: f64,
    /// Provider icon code, e.g. "10d"
    pub condition_code: String,
    pub description: String,
}

impl From<ForecastEntry> for RawForecastSample {
    fn from(entry: ForecastEntry) -> Self {
        let weather = entry.weather.into_iter().next();
        let (condition_code, description) = weather
            .map(|w| (w.icon, w.description))
            .unwrap_or_default();

        Self {
            timestamp: entry.dt,
            temperature: entry.main.temp,
            feels_like: entry.main.feels_like,
            temp_min: entry.main.temp_min,
            temp_max: entry.main.temp_max,
            humidity: entry.main.humidity,
            wind_speed: entry.wind.speed,
            condition_code,
            description,
        }
    }
}

// ============================================================================
// Aggregation output (External - part of the view state)
// ============================================================================

/// One calendar day of forecast
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct DaySummary {
    /// Local calendar date; unique within one aggregation
    pub date: NaiveDate,
    /// Weekday name in the configured language
    pub day_label: String,
    pub temp_max: i32,
    pub temp_min: i32,
    /// Condition of the representative (midday) reading
    pub condition_code: String,
    pub description: String,
    pub humidity: u8,
    pub wind_speed: f64,
    pub hourly: Vec<HourSummary>,
}

/// One forecast reading formatted for display
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct HourSummary {
    pub timestamp: i64,
    /// Local time, "HH:MM"
    pub time: String,
    pub temperature: i32,
    pub condition_code: String,
    pub description: String,
    pub wind_speed: f64,
    pub humidity: u8,
}
