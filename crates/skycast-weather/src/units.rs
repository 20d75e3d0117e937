//! Temperature conversion and formatting.
//!
//! Temperatures are carried in Celsius everywhere; the caller passes the
//! display unit into each call.

pub use skycast_core::TemperatureUnit;

/// Convert `value` between units.
pub fn convert_temperature(value: f64, from: TemperatureUnit, to: TemperatureUnit) -> f64 {
    match (from, to) {
        (TemperatureUnit::Celsius, TemperatureUnit::Fahrenheit) => value * 9.0 / 5.0 + 32.0,
        (TemperatureUnit::Fahrenheit, TemperatureUnit::Celsius) => (value - 32.0) * 5.0 / 9.0,
        _ => value,
    }
}

/// Round to the nearest integer, halves toward positive infinity.
fn round_half_up(value: f64) -> i64 {
    (value + 0.5).floor() as i64
}

/// Format a Celsius value for display, e.g. `21°C` or `70°F`.
pub fn format_temperature(celsius: f64, unit: TemperatureUnit) -> String {
    let display = convert_temperature(celsius, TemperatureUnit::Celsius, unit);
    format!("{}{}", round_half_up(display), unit.symbol())
}
