//! Dashboard state and the refresh flows that drive it.
//!
//! The state keeps the last good snapshot across failed refreshes; failures
//! only raise a notice that expires on its own.

use std::fmt::Display;
use std::sync::Arc;

use chrono::{DateTime, Local, TimeDelta, TimeZone, Timelike, Utc};
use parking_lot::RwLock;

use skycast_core::{AppError, Config, DefaultLocation, ErrorKind, TemperatureUnit, WeatherError};

use crate::background::{select, Background};
use crate::daytime::{is_daytime, DaylightInput};
use crate::display::{CurrentView, DayView};
use crate::particles::ParticlePlan;
use crate::provider::WeatherSource;
use crate::search::validate_city;
use crate::types::{Coordinates, LocationQuery, WeatherSnapshot};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Error,
    Warning,
}

/// A transient message shown to the user.
#[derive(Debug, Clone, PartialEq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub kind: ErrorKind,
    pub message: String,
    pub raised_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl Notice {
    pub fn from_error(err: &AppError, raised_at: DateTime<Utc>, duration_secs: u64) -> Self {
        let level = match err {
            AppError::Weather(WeatherError::InvalidQuery(_)) => NoticeLevel::Warning,
            _ => NoticeLevel::Error,
        };
        let expires_at = TimeDelta::try_seconds(i64::try_from(duration_secs).unwrap_or(i64::MAX))
            .and_then(|delta| raised_at.checked_add_signed(delta))
            .unwrap_or(DateTime::<Utc>::MAX_UTC);

        Self {
            level,
            kind: err.kind(),
            message: err.user_message(),
            raised_at,
            expires_at,
        }
    }

    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }
}

/// Everything a renderer needs.
#[derive(Debug, Clone)]
pub struct DashboardState {
    pub snapshot: Option<WeatherSnapshot>,
    pub background: Background,
    pub particles: ParticlePlan,
    pub unit: TemperatureUnit,
    pub notice: Option<Notice>,
    pub loading: bool,
}

impl DashboardState {
    pub fn new(unit: TemperatureUnit) -> Self {
        Self {
            snapshot: None,
            background: Background::Default,
            particles: ParticlePlan::default(),
            unit,
            notice: None,
            loading: false,
        }
    }

    /// Replace the snapshot and recompute background and particles from its
    /// current conditions.
    pub fn apply_snapshot(&mut self, snapshot: WeatherSnapshot, now_utc: i64, local_hour: u32) {
        let current = &snapshot.current;
        let daylight = DaylightInput {
            sun_window: current.sun_window(),
            part_of_day: snapshot.part_of_day,
        };
        let is_day = is_daytime(daylight, now_utc, local_hour);

        self.background = select(
            &current.condition_main,
            &current.condition_description,
            is_day,
        );
        self.particles = ParticlePlan::for_conditions(current);
        tracing::debug!(
            "Background {} ({})",
            self.background.id(),
            if is_day { "day" } else { "night" }
        );

        self.snapshot = Some(snapshot);
        self.loading = false;
    }

    /// Record a failure. The previous snapshot is kept.
    pub fn apply_failure(&mut self, err: &AppError, now: DateTime<Utc>, notice_secs: u64) {
        self.notice = Some(Notice::from_error(err, now, notice_secs));
        self.loading = false;
    }

    pub fn toggle_unit(&mut self) -> TemperatureUnit {
        self.unit = self.unit.toggled();
        self.unit
    }

    /// Drop the notice once it has expired.
    pub fn expire_notice(&mut self, now: DateTime<Utc>) {
        if self.notice.as_ref().is_some_and(|n| n.is_expired(now)) {
            self.notice = None;
        }
    }

    pub fn dismiss_notice(&mut self) {
        self.notice = None;
    }

    pub fn current_view<Tz: TimeZone>(&self, tz: &Tz) -> Option<CurrentView>
    where
        Tz::Offset: Display,
    {
        self.snapshot
            .as_ref()
            .map(|s| CurrentView::new(&s.current, self.unit, tz))
    }

    pub fn day_views<Tz: TimeZone>(&self, tz: &Tz) -> Vec<DayView>
    where
        Tz::Offset: Display,
    {
        self.snapshot
            .as_ref()
            .map(|s| {
                s.daily
                    .iter()
                    .map(|day| DayView::new(day, self.unit, tz))
                    .collect()
            })
            .unwrap_or_default()
    }
}

/// Drives a [`DashboardState`] from a weather source.
pub struct Dashboard<S> {
    source: S,
    state: Arc<RwLock<DashboardState>>,
    default_location: DefaultLocation,
    notice_secs: u64,
}

impl<S: WeatherSource> Dashboard<S> {
    pub fn new(source: S, config: &Config) -> Self {
        Self {
            source,
            state: Arc::new(RwLock::new(DashboardState::new(
                config.weather.temperature_unit,
            ))),
            default_location: config.weather.default_location.clone(),
            notice_secs: config.ui.notice_seconds,
        }
    }

    /// Shared handle for renderers.
    pub fn state(&self) -> Arc<RwLock<DashboardState>> {
        Arc::clone(&self.state)
    }

    /// A copy of the current state.
    pub fn view(&self) -> DashboardState {
        self.state.read().clone()
    }

    pub fn toggle_unit(&self) -> TemperatureUnit {
        self.state.write().toggle_unit()
    }

    pub fn default_location(&self) -> &DefaultLocation {
        &self.default_location
    }

    /// Load the default location. Failures are reported as a notice and returned.
    pub async fn load_default(&self) -> Result<(), AppError> {
        let query = LocationQuery::Coordinates(Coordinates::from(&self.default_location));
        self.refresh(&query).await
    }

    /// Switch to the user's location. Failures are logged and otherwise
    /// ignored since the default location is already on screen.
    pub async fn show_user_location(&self, coordinates: Coordinates) -> bool {
        let query = LocationQuery::Coordinates(coordinates);
        match self.source.fetch(&query).await {
            Ok(snapshot) => {
                self.apply(snapshot);
                true
            }
            Err(e) => {
                tracing::debug!(
                    "User location weather unavailable, keeping {}: {}",
                    self.default_location.name,
                    e
                );
                false
            }
        }
    }

    /// Search for a city typed by the user.
    pub async fn search(&self, input: &str) -> Result<(), AppError> {
        let city = match validate_city(input) {
            Ok(city) => city,
            Err(e) => {
                let err = AppError::from(e);
                self.state
                    .write()
                    .apply_failure(&err, Utc::now(), self.notice_secs);
                return Err(err);
            }
        };

        self.refresh(&LocationQuery::City(city)).await
    }

    async fn refresh(&self, query: &LocationQuery) -> Result<(), AppError> {
        {
            let mut state = self.state.write();
            state.loading = true;
            state.dismiss_notice();
        }

        match self.source.fetch(query).await {
            Ok(snapshot) => {
                self.apply(snapshot);
                Ok(())
            }
            Err(e) => {
                tracing::warn!("Weather refresh failed: {}", e);
                self.state
                    .write()
                    .apply_failure(&e, Utc::now(), self.notice_secs);
                Err(e)
            }
        }
    }

    fn apply(&self, snapshot: WeatherSnapshot) {
        let now = Utc::now().timestamp();
        let local_hour = Local::now().hour();
        self.state.write().apply_snapshot(snapshot, now, local_hour);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{CurrentConditions, PartOfDay};
    use parking_lot::Mutex;

    fn snapshot(city: &str, main: &str) -> WeatherSnapshot {
        WeatherSnapshot {
            current: CurrentConditions {
                city_name: city.into(),
                country: "US".into(),
                temperature: 10.0,
                feels_like: 9.0,
                humidity: 50,
                wind_speed: 2.0,
                cloudiness: 20,
                rain_mm: 0.0,
                condition_main: main.into(),
                condition_description: "clear sky".into(),
                icon_code: "01d".into(),
                observed_at: 1_000,
                sunrise: 1_000,
                sunset: 2_000,
            },
            daily: Vec::new(),
            part_of_day: None,
            fetched_at: Utc::now(),
        }
    }

    /// Replays queued results and records the queries it saw.
    struct ScriptedSource {
        results: Mutex<Vec<Result<WeatherSnapshot, AppError>>>,
        queries: Mutex<Vec<LocationQuery>>,
    }

    impl ScriptedSource {
        fn new(mut results: Vec<Result<WeatherSnapshot, AppError>>) -> Self {
            results.reverse();
            Self {
                results: Mutex::new(results),
                queries: Mutex::new(Vec::new()),
            }
        }
    }

    impl WeatherSource for ScriptedSource {
        async fn fetch(&self, query: &LocationQuery) -> Result<WeatherSnapshot, AppError> {
            self.queries.lock().push(query.clone());
            self.results
                .lock()
                .pop()
                .unwrap_or_else(|| Err(WeatherError::RateLimited.into()))
        }
    }

    #[test]
    fn test_apply_snapshot_sets_background() {
        let mut state = DashboardState::new(TemperatureUnit::Celsius);
        state.apply_snapshot(snapshot("A", "Clear"), 1_500, 12);
        assert_eq!(state.background, Background::ClearDay);

        state.apply_snapshot(snapshot("A", "Clear"), 2_001, 12);
        assert_eq!(state.background, Background::ClearNight);
    }

    #[test]
    fn test_polar_snapshot_uses_forecast_flag() {
        let mut polar = snapshot("Longyearbyen", "Clear");
        polar.current.sunrise = 0;
        polar.current.sunset = 0;
        polar.part_of_day = Some(PartOfDay::Night);

        let mut state = DashboardState::new(TemperatureUnit::Celsius);
        state.apply_snapshot(polar.clone(), 1_500, 12);
        assert_eq!(state.background, Background::ClearNight);

        polar.part_of_day = None;
        state.apply_snapshot(polar, 1_500, 12);
        assert_eq!(state.background, Background::ClearDay);
        assert_eq!(state.current_view(&Utc).unwrap().sunrise, "--");
    }

    #[test]
    fn test_failure_keeps_snapshot() {
        let mut state = DashboardState::new(TemperatureUnit::Celsius);
        state.apply_snapshot(snapshot("Paris", "Clear"), 1_500, 12);

        let err = AppError::from(WeatherError::CityNotFound("Nowhere".into()));
        state.apply_failure(&err, Utc::now(), 5);

        assert_eq!(state.snapshot.as_ref().unwrap().current.city_name, "Paris");
        let notice = state.notice.as_ref().unwrap();
        assert_eq!(notice.kind, ErrorKind::NotFound);
        assert_eq!(notice.level, NoticeLevel::Error);
    }

    #[test]
    fn test_notice_expires() {
        let raised = Utc::now();
        let err = AppError::from(WeatherError::RateLimited);
        let mut state = DashboardState::new(TemperatureUnit::Celsius);
        state.apply_failure(&err, raised, 5);

        state.expire_notice(raised + TimeDelta::seconds(4));
        assert!(state.notice.is_some());
        state.expire_notice(raised + TimeDelta::seconds(5));
        assert!(state.notice.is_none());
    }

    #[test]
    fn test_unit_is_threaded_into_views() {
        let mut state = DashboardState::new(TemperatureUnit::Celsius);
        state.apply_snapshot(snapshot("A", "Clear"), 1_500, 12);
        assert_eq!(state.current_view(&Utc).unwrap().temperature, "10°C");

        state.toggle_unit();
        assert_eq!(state.current_view(&Utc).unwrap().temperature, "50°F");
    }

    #[tokio::test]
    async fn test_failed_search_keeps_previous_weather() {
        let source = ScriptedSource::new(vec![
            Ok(snapshot("New York", "Clouds")),
            Err(WeatherError::CityNotFound("Atlantis".into()).into()),
        ]);
        let dashboard = Dashboard::new(source, &Config::default());

        dashboard.load_default().await.unwrap();
        let err = dashboard.search("Atlantis").await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);

        let view = dashboard.view();
        assert_eq!(view.snapshot.unwrap().current.city_name, "New York");
        assert!(!view.loading);
        assert_eq!(
            view.notice.unwrap().message,
            "City not found. Please check the spelling and try again."
        );
    }

    #[tokio::test]
    async fn test_invalid_search_never_reaches_source() {
        let dashboard = Dashboard::new(ScriptedSource::new(Vec::new()), &Config::default());

        assert!(dashboard.search("  x ").await.is_err());
        assert!(dashboard.source.queries.lock().is_empty());
        assert_eq!(dashboard.view().notice.unwrap().level, NoticeLevel::Warning);
    }

    #[tokio::test]
    async fn test_search_trims_city() {
        let source = ScriptedSource::new(vec![Ok(snapshot("London", "Rain"))]);
        let dashboard = Dashboard::new(source, &Config::default());

        dashboard.search("  London ").await.unwrap();
        assert_eq!(
            dashboard.source.queries.lock().as_slice(),
            &[LocationQuery::City("London".into())]
        );
    }

    #[tokio::test]
    async fn test_user_location_failure_is_silent() {
        let source = ScriptedSource::new(vec![
            Ok(snapshot("New York", "Clear")),
            Err(WeatherError::RateLimited.into()),
        ]);
        let dashboard = Dashboard::new(source, &Config::default());

        dashboard.load_default().await.unwrap();
        assert!(!dashboard.show_user_location(Coordinates::new(1.0, 2.0)).await);

        let view = dashboard.view();
        assert!(view.notice.is_none());
        assert_eq!(view.snapshot.unwrap().current.city_name, "New York");
    }

    #[tokio::test]
    async fn test_default_load_uses_configured_coordinates() {
        let source = ScriptedSource::new(vec![Ok(snapshot("New York", "Clear"))]);
        let dashboard = Dashboard::new(source, &Config::default());

        dashboard.load_default().await.unwrap();
        assert_eq!(
            dashboard.source.queries.lock()[0],
            LocationQuery::Coordinates(Coordinates::new(40.7128, -74.0060))
        );
    }
}
