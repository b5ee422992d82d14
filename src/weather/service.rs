use reqwest::Client;
use serde::de::DeserializeOwned;
use thiserror::Error;

use super::models::{CurrentConditions, CurrentWeatherPayload, ProviderErrorBody};

#[derive(Error, Debug)]
pub enum WeatherError {
    #[error("Failed to fetch weather data: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("City not found: {0}")]
    CityNotFound(String),

    #[error("Invalid OpenWeatherMap API key")]
    Unauthorized,

    #[error("API error: {0}")]
    ApiError(String),
}

/// Fixed request parameters for one deployment: one city, one unit system,
/// one language.
#[derive(Debug, Clone)]
pub struct ProviderSettings {
    pub base_url: String,
    pub api_key: String,
    pub city: String,
    pub units: String,
    pub lang: String,
}

impl ProviderSettings {
    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), path)
    }
}

/// GET `{base_url}/{path}` with the deployment's query parameters and decode
/// the JSON body. Shared by the /weather and /forecast services.
pub(crate) async fn get_json<T: DeserializeOwned>(
    client: &Client,
    settings: &ProviderSettings,
    path: &str,
) -> Result<T, WeatherError> {
    let url = settings.endpoint(path);
    tracing::debug!(url = %url, city = %settings.city, lang = %settings.lang, "Requesting OpenWeatherMap");

    // Use query builder for proper URL encoding - handles spaces and special chars
    let response = client
        .get(&url)
        .query(&[
            ("q", settings.city.as_str()),
            ("appid", settings.api_key.as_str()),
            ("units", settings.units.as_str()),
            ("lang", settings.lang.as_str()),
        ])
        .send()
        .await?;

    let status = response.status();
    tracing::debug!(status = %status, path = %path, "Received API response");

    if status == reqwest::StatusCode::NOT_FOUND {
        return Err(WeatherError::CityNotFound(settings.city.clone()));
    }

    if status == reqwest::StatusCode::UNAUTHORIZED {
        return Err(WeatherError::Unauthorized);
    }

    if !status.is_success() {
        let error: ProviderErrorBody = response.json().await.unwrap_or(ProviderErrorBody {
            message: format!("HTTP {}", status),
        });
        return Err(WeatherError::ApiError(error.message));
    }

    Ok(response.json().await?)
}

/// Fetches current conditions for the configured city
pub struct WeatherService {
    client: Client,
    settings: ProviderSettings,
}

impl WeatherService {
    pub fn new(client: Client, settings: ProviderSettings) -> Self {
        Self { client, settings }
    }

    pub async fn get_current_weather(&self) -> Result<CurrentConditions, WeatherError> {
        let data: CurrentWeatherPayload = get_json(&self.client, &self.settings, "weather").await?;
        let current = CurrentConditions::from(data);

        tracing::info!(
            city = %current.city,
            temp = %current.temperature,
            "Current weather fetched successfully"
        );

        Ok(current)
    }
}
