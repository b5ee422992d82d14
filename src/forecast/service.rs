use reqwest::Client;

use super::models::ForecastPayload;
use crate::weather::service::{get_json, ProviderSettings, WeatherError};

/// Fetches the 5 day / 3 hour forecast for the configured city
pub struct ForecastService {
    client: Client,
    settings: ProviderSettings,
}

impl ForecastService {
    pub fn new(client: Client, settings: ProviderSettings) -> Self {
        Self { client, settings }
    }

    pub async fn get_forecast(&self) -> Result<ForecastPayload, WeatherError> {
        let data: ForecastPayload = get_json(&self.client, &self.settings, "forecast").await?;

        tracing::info!(
            city = %data.city.name,
            samples = data.list.len(),
            "Forecast fetched successfully"
        );

        Ok(data)
    }
}
