//! Day/night classification.

use serde::{Deserialize, Serialize};

use crate::types::PartOfDay;

/// Local hours treated as daytime when nothing better is known.
const FALLBACK_DAY_START_HOUR: u32 = 6;
const FALLBACK_DAY_END_HOUR: u32 = 20;

/// Sunrise and sunset for the observed location, in Unix seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SunWindow {
    pub sunrise: i64,
    pub sunset: i64,
}

/// Everything known about whether it is currently day.
///
/// The sun window is authoritative; the part-of-day flag is only consulted
/// without one, and the wall clock only when both are absent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DaylightInput {
    pub sun_window: Option<SunWindow>,
    pub part_of_day: Option<PartOfDay>,
}

/// Classify `now_utc` (Unix seconds) as day or night.
///
/// `local_hour` is the wall-clock hour, used only when neither a sun window
/// nor a part-of-day flag is available.
pub fn is_daytime(input: DaylightInput, now_utc: i64, local_hour: u32) -> bool {
    if let Some(window) = input.sun_window {
        return (window.sunrise..=window.sunset).contains(&now_utc);
    }

    match input.part_of_day {
        Some(part_of_day) => part_of_day == PartOfDay::Day,
        None => (FALLBACK_DAY_START_HOUR..FALLBACK_DAY_END_HOUR).contains(&local_hour),
    }
}
