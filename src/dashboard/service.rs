use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use axum::http::StatusCode;
use chrono::{DateTime, NaiveDate, Utc};
use chrono_tz::Tz;
use thiserror::Error;
use tokio::sync::watch;

use super::state::{reconcile_selection, ViewState};
use crate::classify::{classify_season, classify_time_of_day};
use crate::error::HttpError;
use crate::forecast::{aggregate, Language};
use crate::impl_into_response;
use crate::provider::WeatherProvider;

/// The one message users see for any failed refresh
pub const FETCH_FAILED_MESSAGE: &str = "Failed to load weather data, please try again later";

#[derive(Error, Debug)]
pub enum DashboardError {
    #[error("No forecast for {0}")]
    DayNotFound(NaiveDate),
}

impl HttpError for DashboardError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::DayNotFound(_) => StatusCode::NOT_FOUND,
        }
    }

    fn error_code(&self) -> Option<&'static str> {
        match self {
            Self::DayNotFound(_) => Some("DAY_NOT_FOUND"),
        }
    }
}

impl_into_response!(DashboardError);

/// Owns the dashboard view state.
///
/// Every change is published as a whole new `ViewState` through a watch
/// channel, so readers always see a complete snapshot. Overlapping refreshes
/// are allowed; whichever completes last wins.
pub struct DashboardService {
    provider: Arc<dyn WeatherProvider>,
    language: Language,
    tz: Tz,
    state: watch::Sender<ViewState>,
    /// Refreshes currently running; only touched inside `send_modify`
    in_flight: AtomicUsize,
}

impl DashboardService {
    pub fn new(provider: Arc<dyn WeatherProvider>, city: &str, lang: &str, tz: Tz) -> Self {
        let now = Utc::now().with_timezone(&tz);
        let initial = ViewState::new(city, classify_season(&now), classify_time_of_day(&now));
        let (state, _) = watch::channel(initial);

        Self {
            provider,
            language: Language::from_code(lang),
            tz,
            state,
            in_flight: AtomicUsize::new(0),
        }
    }

    /// Latest published snapshot
    pub fn snapshot(&self) -> ViewState {
        self.state.borrow().clone()
    }

    /// Receive every snapshot published from now on
    pub fn subscribe(&self) -> watch::Receiver<ViewState> {
        self.state.subscribe()
    }

    /// Fetch current weather and forecast concurrently, aggregate, and
    /// replace the forecast part of the view state.
    ///
    /// Failures never propagate: they become the state's `error` message and
    /// the previously loaded data stays on display.
    pub async fn refresh(&self) -> ViewState {
        let in_flight = InFlight::begin(self);

        tracing::debug!("Refreshing dashboard");

        let result = tokio::try_join!(self.provider.current_weather(), self.provider.forecast());

        match result {
            Ok((current, samples)) => {
                let sample_count = samples.len();
                let days = aggregate(samples, self.language, self.tz);
                let completed_at = Utc::now();
                let local_now = completed_at.with_timezone(&self.tz);

                tracing::info!(
                    samples = sample_count,
                    days = days.len(),
                    temp = %current.temperature,
                    "Dashboard refreshed"
                );

                in_flight.finish(|state| {
                    state.selected_date = reconcile_selection(state.selected_date, &days);
                    state.current_weather = Some(current);
                    state.daily_forecast = days;
                    state.error = None;
                    state.season = classify_season(&local_now);
                    state.time_of_day = classify_time_of_day(&local_now);
                    state.updated_at = Some(completed_at);
                });
            }
            Err(e) => {
                tracing::error!(error = %e, "Dashboard refresh failed");

                in_flight.finish(|state| {
                    state.error = Some(FETCH_FAILED_MESSAGE.to_string());
                });
            }
        }

        self.snapshot()
    }

    /// Select the day shown in the hourly row
    pub fn select_day(&self, date: NaiveDate) -> Result<ViewState, DashboardError> {
        let mut found = false;
        self.state.send_if_modified(|state| {
            if state.day(date).is_none() {
                return false;
            }
            found = true;
            if state.selected_date == Some(date) {
                return false;
            }
            state.selected_date = Some(date);
            true
        });

        if !found {
            return Err(DashboardError::DayNotFound(date));
        }

        tracing::debug!(date = %date, "Selected forecast day");
        Ok(self.snapshot())
    }

    /// Re-derive season and time of day from the wall clock. Forecast data is
    /// left untouched.
    pub fn reclassify(&self) -> ViewState {
        self.reclassify_at(Utc::now())
    }

    pub fn reclassify_at(&self, now: DateTime<Utc>) -> ViewState {
        let local = now.with_timezone(&self.tz);
        let season = classify_season(&local);
        let time_of_day = classify_time_of_day(&local);

        let changed = self.state.send_if_modified(|state| {
            if state.season == season && state.time_of_day == time_of_day {
                return false;
            }
            state.season = season;
            state.time_of_day = time_of_day;
            true
        });

        if changed {
            tracing::info!(season = ?season, time_of_day = ?time_of_day, "Time of day changed");
        }

        self.snapshot()
    }

    /// Decrement the in-flight counter, returning whether any refresh is
    /// still running. Call only inside `send_modify`.
    fn finish_refresh(&self) -> bool {
        let previous = self.in_flight.fetch_sub(1, Ordering::SeqCst);
        previous > 1
    }
}

/// One running refresh. Dropping it without `finish` (the caller's future
/// was cancelled) still releases its slot and republishes `loading`.
struct InFlight<'a> {
    service: &'a DashboardService,
    finished: bool,
}

impl<'a> InFlight<'a> {
    fn begin(service: &'a DashboardService) -> Self {
        service.state.send_modify(|state| {
            service.in_flight.fetch_add(1, Ordering::SeqCst);
            state.loading = true;
        });
        Self {
            service,
            finished: false,
        }
    }

    /// Apply the refresh outcome and release the slot in one snapshot
    fn finish(mut self, update: impl FnOnce(&mut ViewState)) {
        self.finished = true;
        let service = self.service;
        service.state.send_modify(|state| {
            update(state);
            state.loading = service.finish_refresh();
        });
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        if self.finished {
            return;
        }
        tracing::warn!("Dashboard refresh cancelled before completion");
        let service = self.service;
        service.state.send_modify(|state| {
            state.loading = service.finish_refresh();
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::{Season, TimeOfDay};
    use crate::forecast::RawForecastSample;
    use crate::weather::{CurrentConditions, WeatherError};
    use async_trait::async_trait;
    use chrono::TimeZone;
    use std::sync::atomic::AtomicBool;
    use std::sync::Mutex;
    use tokio::sync::Notify;

    fn current() -> CurrentConditions {
        CurrentConditions {
            city: "Tokyo".to_string(),
            country: Some("JP".to_string()),
            timestamp: 1718000000,
            temperature: 18.4,
            feels_like: 18.1,
            temp_min: 17.2,
            temp_max: 19.5,
            humidity: 77,
            pressure: 1012,
            wind_speed: 3.6,
            condition_code: "10d".to_string(),
            description: "light rain".to_string(),
            visibility: Some(10000),
            sunrise: None,
            sunset: None,
        }
    }

    /// 3-hourly readings starting at `start` (UTC hour boundary)
    fn samples(start: i64, count: usize) -> Vec<RawForecastSample> {
        (0..count)
            .map(|i| RawForecastSample {
                timestamp: start + i as i64 * 3 * 3600,
                temperature: 20.0,
                feels_like: 19.0,
                temp_min: 18.0,
                temp_max: 22.0,
                humidity: 60,
                wind_speed: 2.0,
                condition_code: "02d".to_string(),
                description: "few clouds".to_string(),
            })
            .collect()
    }

    fn june_10() -> i64 {
        Utc.with_ymd_and_hms(2024, 6, 10, 0, 0, 0).unwrap().timestamp()
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    /// Provider serving a configurable forecast, optionally failing
    struct FakeProvider {
        forecast: Mutex<Vec<RawForecastSample>>,
        fail: AtomicBool,
    }

    impl FakeProvider {
        fn new(forecast: Vec<RawForecastSample>) -> Arc<Self> {
            Arc::new(Self {
                forecast: Mutex::new(forecast),
                fail: AtomicBool::new(false),
            })
        }

        fn set_forecast(&self, forecast: Vec<RawForecastSample>) {
            *self.forecast.lock().unwrap() = forecast;
        }
    }

    #[async_trait]
    impl WeatherProvider for FakeProvider {
        async fn current_weather(&self) -> Result<CurrentConditions, WeatherError> {
            Ok(current())
        }

        async fn forecast(&self) -> Result<Vec<RawForecastSample>, WeatherError> {
            if self.fail.load(Ordering::SeqCst) {
                return Err(WeatherError::ApiError("HTTP 500".to_string()));
            }
            Ok(self.forecast.lock().unwrap().clone())
        }
    }

    fn service(provider: Arc<dyn WeatherProvider>) -> DashboardService {
        DashboardService::new(provider, "Tokyo", "en", chrono_tz::UTC)
    }

    #[test]
    fn test_initial_state() {
        let dashboard = service(FakeProvider::new(vec![]));
        let state = dashboard.snapshot();

        assert_eq!(state.city, "Tokyo");
        assert!(state.current_weather.is_none());
        assert!(state.daily_forecast.is_empty());
        assert!(state.selected_date.is_none());
        assert!(!state.loading);
        assert!(state.error.is_none());
        assert!(state.updated_at.is_none());
    }

    #[tokio::test]
    async fn test_refresh_loads_and_selects_first_day() {
        let dashboard = service(FakeProvider::new(samples(june_10(), 16)));
        let state = dashboard.refresh().await;

        assert_eq!(state.daily_forecast.len(), 2);
        assert_eq!(state.selected_date, Some(date(2024, 6, 10)));
        assert_eq!(state.current_weather.as_ref().map(|c| c.humidity), Some(77));
        assert!(!state.loading);
        assert!(state.error.is_none());
        assert!(state.updated_at.is_some());
    }

    #[tokio::test]
    async fn test_empty_forecast_is_not_an_error() {
        let dashboard = service(FakeProvider::new(vec![]));
        let state = dashboard.refresh().await;

        assert!(state.daily_forecast.is_empty());
        assert!(state.selected_date.is_none());
        assert!(state.error.is_none());
        assert!(state.current_weather.is_some());
    }

    #[tokio::test]
    async fn test_selection_survives_refresh() {
        let provider = FakeProvider::new(samples(june_10(), 24));
        let dashboard = service(provider.clone());
        dashboard.refresh().await;
        dashboard.select_day(date(2024, 6, 11)).unwrap();

        // Window moves forward by a day; the 11th is still present
        provider.set_forecast(samples(june_10() + 86400, 24));
        let state = dashboard.refresh().await;
        assert_eq!(state.selected_date, Some(date(2024, 6, 11)));
        assert_eq!(state.daily_forecast[0].date, date(2024, 6, 11));
    }

    #[tokio::test]
    async fn test_stale_selection_falls_back_to_first_day() {
        let provider = FakeProvider::new(samples(june_10(), 16));
        let dashboard = service(provider.clone());
        dashboard.refresh().await;
        dashboard.select_day(date(2024, 6, 10)).unwrap();

        provider.set_forecast(samples(june_10() + 2 * 86400, 16));
        let state = dashboard.refresh().await;
        assert_eq!(state.selected_date, Some(date(2024, 6, 12)));
        assert!(state.selected_day().is_some());
    }

    #[tokio::test]
    async fn test_select_unknown_day() {
        let dashboard = service(FakeProvider::new(samples(june_10(), 8)));
        dashboard.refresh().await;

        let result = dashboard.select_day(date(2024, 7, 1));
        assert!(matches!(result, Err(DashboardError::DayNotFound(_))));
        assert_eq!(dashboard.snapshot().selected_date, Some(date(2024, 6, 10)));
    }

    #[tokio::test]
    async fn test_failure_sets_error_and_keeps_data() {
        let provider = FakeProvider::new(samples(june_10(), 16));
        let dashboard = service(provider.clone());
        let loaded = dashboard.refresh().await;

        provider.fail.store(true, Ordering::SeqCst);
        let state = dashboard.refresh().await;

        assert_eq!(state.error.as_deref(), Some(FETCH_FAILED_MESSAGE));
        assert!(!state.loading);
        assert_eq!(state.daily_forecast, loaded.daily_forecast);
        assert_eq!(state.updated_at, loaded.updated_at);

        provider.fail.store(false, Ordering::SeqCst);
        let state = dashboard.refresh().await;
        assert!(state.error.is_none());
    }

    #[tokio::test]
    async fn test_failure_before_first_load() {
        let provider = FakeProvider::new(vec![]);
        provider.fail.store(true, Ordering::SeqCst);
        let dashboard = service(provider);

        let state = dashboard.refresh().await;
        assert!(state.current_weather.is_none());
        assert_eq!(state.error.as_deref(), Some(FETCH_FAILED_MESSAGE));
        assert!(!state.loading);
    }

    #[tokio::test]
    async fn test_subscribers_see_whole_snapshots() {
        let dashboard = service(FakeProvider::new(samples(june_10(), 16)));
        let mut rx = dashboard.subscribe();

        dashboard.refresh().await;

        assert!(rx.has_changed().unwrap());
        let state = rx.borrow_and_update().clone();
        assert_eq!(state.daily_forecast.len(), 2);
        assert_eq!(state.selected_date, Some(date(2024, 6, 10)));
    }

    #[test]
    fn test_reclassify_only_touches_classification() {
        let dashboard = service(FakeProvider::new(vec![]));

        let evening = Utc.with_ymd_and_hms(2024, 10, 5, 17, 0, 0).unwrap();
        let state = dashboard.reclassify_at(evening);
        assert_eq!(state.season, Season::Autumn);
        assert_eq!(state.time_of_day, TimeOfDay::Evening);
        assert!(state.updated_at.is_none());

        let night = Utc.with_ymd_and_hms(2024, 12, 5, 22, 0, 0).unwrap();
        let state = dashboard.reclassify_at(night);
        assert_eq!(state.season, Season::Winter);
        assert_eq!(state.time_of_day, TimeOfDay::Night);
    }

    #[test]
    fn test_reclassify_uses_configured_timezone() {
        let dashboard = DashboardService::new(
            FakeProvider::new(vec![]),
            "Tokyo",
            "ja",
            chrono_tz::Asia::Tokyo,
        );
        // 23:00 UTC on Feb 28 is 08:00 on Feb 29 (2024) in Tokyo
        let now = Utc.with_ymd_and_hms(2024, 2, 28, 23, 0, 0).unwrap();
        let state = dashboard.reclassify_at(now);
        assert_eq!(state.season, Season::Winter);
        assert_eq!(state.time_of_day, TimeOfDay::Day);
    }

    /// Provider whose forecast call blocks until released
    struct GatedProvider {
        gate: Notify,
        forecast: Vec<RawForecastSample>,
    }

    #[async_trait]
    impl WeatherProvider for GatedProvider {
        async fn current_weather(&self) -> Result<CurrentConditions, WeatherError> {
            Ok(current())
        }

        async fn forecast(&self) -> Result<Vec<RawForecastSample>, WeatherError> {
            self.gate.notified().await;
            Ok(self.forecast.clone())
        }
    }

    #[tokio::test]
    async fn test_loading_while_refresh_in_flight() {
        let provider = Arc::new(GatedProvider {
            gate: Notify::new(),
            forecast: samples(june_10(), 8),
        });
        let dashboard = Arc::new(service(provider.clone()));
        let mut rx = dashboard.subscribe();

        let task = {
            let dashboard = Arc::clone(&dashboard);
            tokio::spawn(async move { dashboard.refresh().await })
        };

        rx.changed().await.unwrap();
        assert!(rx.borrow_and_update().loading);

        provider.gate.notify_one();
        let state = task.await.unwrap();
        assert!(!state.loading);
        assert_eq!(state.daily_forecast.len(), 1);
    }

    #[tokio::test]
    async fn test_cancelled_refresh_releases_loading() {
        let provider = Arc::new(GatedProvider {
            gate: Notify::new(),
            forecast: samples(june_10(), 8),
        });
        let dashboard = service(provider.clone());

        let cancelled =
            tokio::time::timeout(std::time::Duration::from_millis(20), dashboard.refresh()).await;
        assert!(cancelled.is_err());

        let state = dashboard.snapshot();
        assert!(!state.loading);
        assert!(state.error.is_none());
        assert!(state.daily_forecast.is_empty());

        // A later refresh that completes reports loading=false again
        provider.gate.notify_one();
        let state = dashboard.refresh().await;
        assert!(!state.loading);
        assert!(state.error.is_none());
        assert_eq!(state.daily_forecast.len(), 1);
    }

    #[tokio::test]
    async fn test_cancelled_refresh_keeps_overlapping_one_loading() {
        let provider = Arc::new(GatedProvider {
            gate: Notify::new(),
            forecast: samples(june_10(), 8),
        });
        let dashboard = Arc::new(service(provider.clone()));
        let mut rx = dashboard.subscribe();

        let running = {
            let dashboard = Arc::clone(&dashboard);
            tokio::spawn(async move { dashboard.refresh().await })
        };
        rx.changed().await.unwrap();

        let cancelled =
            tokio::time::timeout(std::time::Duration::from_millis(20), dashboard.refresh()).await;
        assert!(cancelled.is_err());
        assert!(dashboard.snapshot().loading);

        provider.gate.notify_one();
        let state = running.await.unwrap();
        assert!(!state.loading);
        assert_eq!(state.daily_forecast.len(), 1);
    }
}
