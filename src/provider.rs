use async_trait::async_trait;

use crate::forecast::{ForecastService, RawForecastSample};
use crate::weather::{CurrentConditions, WeatherError, WeatherService};

/// Source of weather data for the dashboard
#[async_trait]
pub trait WeatherProvider: Send + Sync {
    /// Current conditions for the configured city
    async fn current_weather(&self) -> Result<CurrentConditions, WeatherError>;

    /// Time-ordered forecast readings for the configured city
    async fn forecast(&self) -> Result<Vec<RawForecastSample>, WeatherError>;
}

/// OpenWeatherMap 2.5 implementation of WeatherProvider
pub struct OpenWeatherMap {
    weather: WeatherService,
    forecast: ForecastService,
}

impl OpenWeatherMap {
    pub fn new(weather: WeatherService, forecast: ForecastService) -> Self {
        Self { weather, forecast }
    }
}

#[async_trait]
impl WeatherProvider for OpenWeatherMap {
    async fn current_weather(&self) -> Result<CurrentConditions, WeatherError> {
        self.weather.get_current_weather().await
    }

    async fn forecast(&self) -> Result<Vec<RawForecastSample>, WeatherError> {
        Ok(self.forecast.get_forecast().await?.into_samples())
    }
}
