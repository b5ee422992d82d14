use chrono::{Datelike, Timelike};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Calendar season, derived from the month
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Season {
    Spring,
    Summer,
    Autumn,
    Winter,
}

/// Part of the day, derived from the clock hour
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum TimeOfDay {
    Morning,
    Day,
    Evening,
    Night,
}

/// Spring is March-May, summer June-August, autumn September-November,
/// everything else is winter.
pub fn classify_season<D: Datelike>(now: &D) -> Season {
    match now.month0() {
        2..=4 => Season::Spring,
        5..=7 => Season::Summer,
        8..=10 => Season::Autumn,
        _ => Season::Winter,
    }
}

/// Morning is [05:00, 08:00), day [08:00, 16:00), evening [16:00, 20:00),
/// everything else is night.
pub fn classify_time_of_day<T: Timelike>(now: &T) -> TimeOfDay {
    match now.hour() {
        5..=7 => TimeOfDay::Morning,
        8..=15 => TimeOfDay::Day,
        16..=19 => TimeOfDay::Evening,
        _ => TimeOfDay::Night,
    }
}
