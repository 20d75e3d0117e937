use chrono::{DateTime, NaiveDate, NaiveDateTime, Timelike, Utc};
use serde::{Deserialize, Serialize};

use skycast_core::WeatherError;

use crate::daytime::SunWindow;

/// Format of the provider's local-time text, e.g. `2024-01-01 12:00:00`.
pub const LOCAL_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Part of day flag reported by the provider for a forecast sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PartOfDay {
    #[serde(rename = "d")]
    Day,
    #[serde(rename = "n")]
    Night,
}

impl PartOfDay {
    /// Parse the provider's `pod` flag. Anything other than `d`/`n` is treated as absent.
    pub fn from_flag(flag: &str) -> Option<Self> {
        match flag {
            "d" => Some(Self::Day),
            "n" => Some(Self::Night),
            _ => None,
        }
    }
}

/// Geographic coordinates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

impl From<&skycast_core::DefaultLocation> for Coordinates {
    fn from(location: &skycast_core::DefaultLocation) -> Self {
        Self::new(location.latitude, location.longitude)
    }
}

/// What to ask the provider for.
#[derive(Debug, Clone, PartialEq)]
pub enum LocationQuery {
    City(String),
    Coordinates(Coordinates),
}

/// One 3-hour forecast data point. Temperatures are in Celsius.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastSample {
    pub timestamp: i64,
    pub temperature: f64,
    pub condition_main: String,
    pub condition_description: String,
    pub icon_code: String,
    pub local_time: NaiveDateTime,
    pub part_of_day: Option<PartOfDay>,
}

impl ForecastSample {
    /// Build a sample, parsing the provider's local-time text.
    ///
    /// Text that is not `YYYY-MM-DD HH:MM:SS` is rejected here so that
    /// aggregation never sees a sample without a date and hour.
    pub fn new(
        timestamp: i64,
        local_time_text: &str,
        temperature: f64,
        condition_main: impl Into<String>,
        condition_description: impl Into<String>,
        icon_code: impl Into<String>,
    ) -> Result<Self, WeatherError> {
        let local_time = NaiveDateTime::parse_from_str(local_time_text, LOCAL_TIME_FORMAT)
            .map_err(|e| {
                WeatherError::InvalidSample(format!("unparsable time {:?}: {}", local_time_text, e))
            })?;

        if !temperature.is_finite() {
            return Err(WeatherError::InvalidSample(format!(
                "non-finite temperature at {}",
                local_time_text
            )));
        }

        Ok(Self {
            timestamp,
            temperature,
            condition_main: condition_main.into(),
            condition_description: condition_description.into(),
            icon_code: icon_code.into(),
            local_time,
            part_of_day: None,
        })
    }

    pub fn with_part_of_day(mut self, part_of_day: Option<PartOfDay>) -> Self {
        self.part_of_day = part_of_day;
        self
    }

    /// Calendar date used as the grouping key
    pub fn date(&self) -> NaiveDate {
        self.local_time.date()
    }

    pub fn local_hour(&self) -> u32 {
        self.local_time.hour()
    }
}

/// Aggregated view of all samples sharing a calendar date
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailySummary {
    pub date: NaiveDate,
    pub representative_timestamp: i64,
    pub min_temperature: f64,
    pub max_temperature: f64,
    pub icon_code: String,
    pub condition_description: String,
}

impl DailySummary {
    /// `YYYY-MM-DD`
    pub fn date_key(&self) -> String {
        self.date.format("%Y-%m-%d").to_string()
    }
}

/// Current weather conditions at the queried location. Temperatures are in Celsius.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentConditions {
    pub city_name: String,
    pub country: String,
    pub temperature: f64,
    pub feels_like: f64,
    pub humidity: u8,
    pub wind_speed: f64,
    pub cloudiness: u8,
    /// Recent precipitation in mm (1h if reported, else 3h)
    pub rain_mm: f64,
    pub condition_main: String,
    pub condition_description: String,
    pub icon_code: String,
    pub observed_at: i64,
    pub sunrise: i64,
    pub sunset: i64,
}

impl CurrentConditions {
    /// Sunrise and sunset, unless the provider reported none (zero).
    pub fn sun_window(&self) -> Option<SunWindow> {
        (self.sunrise != 0 && self.sunset != 0).then_some(SunWindow {
            sunrise: self.sunrise,
            sunset: self.sunset,
        })
    }
}

/// Complete weather data bundle for one location
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherSnapshot {
    pub current: CurrentConditions,
    pub daily: Vec<DailySummary>,
    /// Part-of-day flag of the nearest forecast slot
    #[serde(default)]
    pub part_of_day: Option<PartOfDay>,
    pub fetched_at: DateTime<Utc>,
}
