//! Text views of a snapshot for a given unit and time zone.

use std::fmt::Display;

use chrono::{DateTime, TimeZone};
use serde::Serialize;

use crate::api::icon_url;
use crate::types::{CurrentConditions, DailySummary};
use crate::units::{format_temperature, TemperatureUnit};

/// Shown in place of sunrise/sunset when the sun neither rises nor sets.
const NO_SUN: &str = "--";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CurrentView {
    pub location: String,
    pub temperature: String,
    pub feels_like: String,
    pub humidity: String,
    pub wind: String,
    pub description: String,
    pub icon_url: String,
    pub sunrise: String,
    pub sunset: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DayView {
    pub label: String,
    pub high: String,
    pub low: String,
    pub description: String,
    pub icon_url: String,
}

fn with_zone<Tz: TimeZone>(timestamp: i64, tz: &Tz, pattern: &str) -> String
where
    Tz::Offset: Display,
{
    match DateTime::from_timestamp(timestamp, 0) {
        Some(utc) => utc.with_timezone(tz).format(pattern).to_string(),
        None => timestamp.to_string(),
    }
}

/// `Mon, Jan 1`
pub fn format_date<Tz: TimeZone>(timestamp: i64, tz: &Tz) -> String
where
    Tz::Offset: Display,
{
    with_zone(timestamp, tz, "%a, %b %-d")
}

/// `09:30 AM`
pub fn format_time<Tz: TimeZone>(timestamp: i64, tz: &Tz) -> String
where
    Tz::Offset: Display,
{
    with_zone(timestamp, tz, "%I:%M %p")
}

impl CurrentView {
    pub fn new<Tz: TimeZone>(current: &CurrentConditions, unit: TemperatureUnit, tz: &Tz) -> Self
    where
        Tz::Offset: Display,
    {
        let location = if current.country.is_empty() {
            current.city_name.clone()
        } else {
            format!("{}, {}", current.city_name, current.country)
        };

        Self {
            location,
            temperature: format_temperature(current.temperature, unit),
            feels_like: format_temperature(current.feels_like, unit),
            humidity: format!("{}%", current.humidity),
            wind: format!("{} m/s", current.wind_speed),
            description: current.condition_description.clone(),
            icon_url: icon_url(&current.icon_code),
            sunrise: current
                .sun_window()
                .map_or_else(|| NO_SUN.to_string(), |w| format_time(w.sunrise, tz)),
            sunset: current
                .sun_window()
                .map_or_else(|| NO_SUN.to_string(), |w| format_time(w.sunset, tz)),
        }
    }
}

impl DayView {
    pub fn new<Tz: TimeZone>(day: &DailySummary, unit: TemperatureUnit, tz: &Tz) -> Self
    where
        Tz::Offset: Display,
    {
        Self {
            label: format_date(day.representative_timestamp, tz),
            high: format_temperature(day.max_temperature, unit),
            low: format_temperature(day.min_temperature, unit),
            description: day.condition_description.clone(),
            icon_url: icon_url(&day.icon_code),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, Utc};

    #[test]
    fn test_format_date_and_time() {
        // 2024-01-01 09:30:00 UTC
        assert_eq!(format_date(1_704_101_400, &Utc), "Mon, Jan 1");
        assert_eq!(format_time(1_704_101_400, &Utc), "09:30 AM");
        assert_eq!(format_time(1_704_101_400 + 6 * 3600, &Utc), "03:30 PM");
    }

    #[test]
    fn test_day_view_uses_unit() {
        let day = DailySummary {
            date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            representative_timestamp: 1_704_110_400,
            min_temperature: 0.0,
            max_temperature: 100.0,
            icon_code: "01d".into(),
            condition_description: "clear sky".into(),
        };

        let view = DayView::new(&day, TemperatureUnit::Fahrenheit, &Utc);
        assert_eq!(view.high, "212°F");
        assert_eq!(view.low, "32°F");
        assert_eq!(view.label, "Mon, Jan 1");

        let view = DayView::new(&day, TemperatureUnit::Celsius, &Utc);
        assert_eq!(view.high, "100°C");
    }

    #[test]
    fn test_current_view() {
        let current = CurrentConditions {
            city_name: "New York".into(),
            country: "US".into(),
            temperature: 21.6,
            feels_like: 20.0,
            humidity: 40,
            wind_speed: 3.5,
            cloudiness: 0,
            rain_mm: 0.0,
            condition_main: "Clear".into(),
            condition_description: "clear sky".into(),
            icon_code: "01d".into(),
            observed_at: 0,
            sunrise: 1_704_101_400,
            sunset: 1_704_101_400,
        };
        let view = CurrentView::new(&current, TemperatureUnit::Celsius, &Utc);
        assert_eq!(view.location, "New York, US");
        assert_eq!(view.temperature, "22°C");
        assert_eq!(view.humidity, "40%");
        assert_eq!(view.wind, "3.5 m/s");
        assert_eq!(view.sunrise, "09:30 AM");
    }
}
