pub mod aggregate;
pub mod handlers;
pub mod language;
pub mod models;
mod service;

pub use aggregate::aggregate;
pub use language::Language;
pub use models::{DaySummary, HourSummary, RawForecastSample};
pub use service::ForecastService;
