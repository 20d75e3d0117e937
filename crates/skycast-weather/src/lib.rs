//! Weather engine for SkyCast
//!
//! Aggregates OpenWeatherMap's 5-day/3-hour forecast into daily summaries,
//! picks a background for the current conditions and formats temperatures
//! in the caller's chosen unit.

pub mod api;
pub mod background;
pub mod dashboard;
pub mod daytime;
pub mod display;
pub mod forecast;
pub mod location;
pub mod particles;
pub mod provider;
pub mod search;
pub mod types;
pub mod units;

pub use background::{select as select_background, Background};
pub use dashboard::{Dashboard, DashboardState, Notice, NoticeLevel};
pub use daytime::{is_daytime, DaylightInput, SunWindow};
pub use display::{CurrentView, DayView};
pub use forecast::{summarize, MAX_FORECAST_DAYS};
pub use location::{resolve_location, LocationError, LocationSource, NoLocation, StaticLocation};
pub use particles::ParticlePlan;
pub use provider::{WeatherProvider, WeatherSource};
pub use search::validate_city;
pub use types::*;
pub use units::{convert_temperature, format_temperature, TemperatureUnit};
