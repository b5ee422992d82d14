use chrono::{DateTime, Datelike, NaiveDate, Timelike};
use chrono_tz::Tz;
use indexmap::IndexMap;

use super::language::Language;
use super::models::{DaySummary, HourSummary, RawForecastSample};

/// The reading closest to how the day "feels" is the one at local noon
const MIDDAY_HOUR: u32 = 12;

type LocalSample = (DateTime<Tz>, RawForecastSample);

/// Group time-ordered forecast readings into calendar days (in `tz`).
///
/// Days appear in the order their first reading appears, readings keep their
/// input order inside a day. The input is expected to be sorted already; it is
/// grouped, never re-sorted. Duplicate timestamps are kept as separate hours.
pub fn aggregate(samples: Vec<RawForecastSample>, language: Language, tz: Tz) -> Vec<DaySummary> {
    let mut days: IndexMap<NaiveDate, Vec<LocalSample>> = IndexMap::new();

    for sample in samples {
        let Some(local) = local_time(sample.timestamp, tz) else {
            tracing::warn!(
                timestamp = sample.timestamp,
                "Skipping forecast reading with out-of-range timestamp"
            );
            continue;
        };
        days.entry(local.date_naive()).or_default().push((local, sample));
    }

    days.into_iter()
        .map(|(date, readings)| summarize_day(date, readings, language))
        .collect()
}

fn local_time(timestamp: i64, tz: Tz) -> Option<DateTime<Tz>> {
    DateTime::from_timestamp(timestamp, 0).map(|utc| utc.with_timezone(&tz))
}

/// Build one day from its readings. Every group holds at least the reading
/// that created it.
fn summarize_day(date: NaiveDate, readings: Vec<LocalSample>, language: Language) -> DaySummary {
    let (_, representative) = readings
        .iter()
        .find(|(time, _)| time.hour() == MIDDAY_HOUR && time.minute() == 0)
        .unwrap_or(&readings[0]);

    // Compare raw values, round only the result
    let temp_max = readings
        .iter()
        .map(|(_, s)| s.temp_max)
        .fold(f64::NEG_INFINITY, f64::max);
    let temp_min = readings
        .iter()
        .map(|(_, s)| s.temp_min)
        .fold(f64::INFINITY, f64::min);

    let condition_code = representative.condition_code.clone();
    let description = representative.description.clone();
    let humidity = representative.humidity;
    let wind_speed = representative.wind_speed;

    let hourly = readings
        .into_iter()
        .map(|(time, sample)| HourSummary {
            timestamp: sample.timestamp,
            time: time.format("%H:%M").to_string(),
            temperature: round_display(sample.temperature),
            condition_code: sample.condition_code,
            description: sample.description,
            wind_speed: sample.wind_speed,
            humidity: sample.humidity,
        })
        .collect();

    DaySummary {
        date,
        day_label: language.weekday_name(date.weekday()).to_string(),
        temp_max: round_display(temp_max),
        temp_min: round_display(temp_min),
        condition_code,
        description,
        humidity,
        wind_speed,
        hourly,
    }
}

/// Round to a whole degree with halves going up, so -2.5 shows as -2
pub fn round_display(value: f64) -> i32 {
    (value + 0.5).floor() as i32
}
