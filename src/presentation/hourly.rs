use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::icons::icon_name;
use crate::forecast::HourSummary;

/// Width of the hourly row
pub const HOURLY_SLOTS: usize = 8;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct HourCard {
    pub time: String,
    pub temperature: i32,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    pub wind_speed: f64,
    pub humidity: u8,
}

/// One cell of the hourly row. Empty cells render blank.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum HourSlot {
    Filled(HourCard),
    Empty,
}

impl From<&HourSummary> for HourSlot {
    fn from(hour: &HourSummary) -> Self {
        HourSlot::Filled(HourCard {
            time: hour.time.clone(),
            temperature: hour.temperature,
            description: hour.description.clone(),
            icon: icon_name(&hour.condition_code).map(str::to_string),
            wind_speed: hour.wind_speed,
            humidity: hour.humidity,
        })
    }
}

/// Fit a day's hours into exactly `HOURLY_SLOTS` cells: the first hours
/// fill the row, the tail is padded with empty cells.
pub fn hourly_row(hours: &[HourSummary]) -> Vec<HourSlot> {
    let mut row: Vec<HourSlot> = hours.iter().take(HOURLY_SLOTS).map(HourSlot::from).collect();
    row.resize(HOURLY_SLOTS, HourSlot::Empty);
    row
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hours(count: usize) -> Vec<HourSummary> {
        (0..count)
            .map(|i| HourSummary {
                timestamp: 1718000000 + i as i64 * 10800,
                time: format!("{:02}:00", (i * 3) % 24),
                temperature: 20 + i as i32,
                condition_code: "10d".to_string(),
                description: "light rain".to_string(),
                wind_speed: 3.0,
                humidity: 70,
            })
            .collect()
    }

    #[test]
    fn test_short_day_padded_with_empty_slots() {
        let row = hourly_row(&hours(3));
        assert_eq!(row.len(), HOURLY_SLOTS);
        assert!(matches!(row[2], HourSlot::Filled(_)));
        assert!(row[3..].iter().all(|slot| *slot == HourSlot::Empty));
    }

    #[test]
    fn test_long_day_truncated() {
        let row = hourly_row(&hours(11));
        assert_eq!(row.len(), HOURLY_SLOTS);
        match &row[7] {
            HourSlot::Filled(card) => assert_eq!(card.time, "21:00"),
            HourSlot::Empty => panic!("expected a filled slot"),
        }
    }

    #[test]
    fn test_no_hours_gives_blank_row() {
        let row = hourly_row(&[]);
        assert_eq!(row, vec![HourSlot::Empty; HOURLY_SLOTS]);
    }

    #[test]
    fn test_filled_slot_carries_icon() {
        let row = hourly_row(&hours(1));
        match &row[0] {
            HourSlot::Filled(card) => {
                assert_eq!(card.icon.as_deref(), Some("rain"));
                assert_eq!(card.temperature, 20);
                assert_eq!(card.humidity, 70);
            }
            HourSlot::Empty => panic!("expected a filled slot"),
        }
    }

    #[test]
    fn test_empty_slot_serializes_without_data() {
        let json = serde_json::to_value(HourSlot::Empty).unwrap();
        assert_eq!(json, serde_json::json!({"kind": "empty"}));
    }
}
