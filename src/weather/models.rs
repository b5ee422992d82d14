use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

// ============================================================================
// OpenWeatherMap 2.5 /weather response (Internal)
// Only the fields the dashboard shows are deserialized
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct CurrentWeatherPayload {
    pub name: String,
    pub dt: i64,
    pub sys: SysInfo,
    pub main: MainInfo,
    pub weather: Vec<WeatherCondition>,
    pub wind: WindInfo,
    pub visibility: Option<u32>,
}

#[derive(Debug, Deserialize)]
pub struct SysInfo {
    pub country: Option<String>,
    pub sunrise: Option<i64>,
    pub sunset: Option<i64>,
}

/// Temperature block shared by /weather and /forecast entries
#[derive(Debug, Deserialize, Clone)]
pub struct MainInfo {
    pub temp: f64,
    pub feels_like: f64,
    pub temp_min: f64,
    pub temp_max: f64,
    pub pressure: u32,
    pub humidity: u8,
}

#[allow(dead_code)]
#[derive(Debug, Deserialize, Clone)]
pub struct WeatherCondition {
    pub id: u32,
    pub main: String,
    pub description: String,
    pub icon: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct WindInfo {
    pub speed: f64,
}

/// Error body OpenWeatherMap sends with non-2xx responses
#[derive(Debug, Deserialize)]
pub struct ProviderErrorBody {
    pub message: String,
}

// ============================================================================
// Current conditions (External - part of the view state)
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct CurrentConditions {
    pub city: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    pub timestamp: i64,
    pub temperature: f64,
    pub feels_like: f64,
    pub temp_min: f64,
    pub temp_max: f64,
    pub humidity: u8,
    pub pressure: u32,
    pub wind_speed: f64,
    pub condition_code: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub visibility: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sunrise: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sunset: Option<i64>,
}

impl From<CurrentWeatherPayload> for CurrentConditions {
    fn from(data: CurrentWeatherPayload) -> Self {
        let weather = data.weather.first();
        Self {
            city: data.name,
            country: data.sys.country,
            timestamp: data.dt,
            temperature: data.main.temp,
            feels_like: data.main.feels_like,
            temp_min: data.main.temp_min,
            temp_max: data.main.temp_max,
            humidity: data.main.humidity,
            pressure: data.main.pressure,
            wind_speed: data.wind.speed,
            condition_code: weather.map(|w| w.icon.clone()).unwrap_or_default(),
            description: weather.map(|w| w.description.clone()).unwrap_or_default(),
            visibility: data.visibility,
            sunrise: data.sys.sunrise,
            sunset: data.sys.sunset,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOKYO_WEATHER: &str = r#"{
        "coord": {"lon": 139.6917, "lat": 35.6895},
        "weather": [{"id": 500, "main": "Rain", "description": "小雨", "icon": "10d"}],
        "base": "stations",
        "main": {"temp": 18.4, "feels_like": 18.1, "temp_min": 17.2, "temp_max": 19.5,
                 "pressure": 1012, "humidity": 77},
        "visibility": 10000,
        "wind": {"speed": 3.6, "deg": 160},
        "clouds": {"all": 75},
        "dt": 1718000000,
        "sys": {"type": 2, "id": 268395, "country": "JP", "sunrise": 1717961000, "sunset": 1718013000},
        "timezone": 32400,
        "id": 1850144,
        "name": "Tokyo",
        "cod": 200
    }"#;

    #[test]
    fn test_decode_current_weather() {
        let payload: CurrentWeatherPayload = serde_json::from_str(TOKYO_WEATHER).unwrap();
        let current = CurrentConditions::from(payload);

        assert_eq!(current.city, "Tokyo");
        assert_eq!(current.country.as_deref(), Some("JP"));
        assert_eq!(current.temperature, 18.4);
        assert_eq!(current.humidity, 77);
        assert_eq!(current.condition_code, "10d");
        assert_eq!(current.description, "小雨");
        assert_eq!(current.visibility, Some(10000));
        assert_eq!(current.sunset, Some(1718013000));
    }

    #[test]
    fn test_missing_condition_yields_empty_strings() {
        let mut value: serde_json::Value = serde_json::from_str(TOKYO_WEATHER).unwrap();
        value["weather"] = serde_json::json!([]);
        let payload: CurrentWeatherPayload = serde_json::from_value(value).unwrap();
        let current = CurrentConditions::from(payload);

        assert!(current.condition_code.is_empty());
        assert!(current.description.is_empty());
    }
}
