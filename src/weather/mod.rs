pub mod models;
pub mod service;

pub use models::CurrentConditions;
pub use service::{ProviderSettings, WeatherError, WeatherService};
