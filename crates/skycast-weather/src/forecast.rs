//! Daily forecast aggregation.
//!
//! Folds the provider's 3-hourly samples into at most five daily summaries
//! with min/max temperatures and one representative icon per day.

use std::ops::RangeInclusive;

use crate::types::{DailySummary, ForecastSample};

/// Maximum number of days emitted by [`summarize`].
pub const MAX_FORECAST_DAYS: usize = 5;

/// Local hours whose sample replaces the day's provisional icon.
pub const MIDDAY_HOURS: RangeInclusive<u32> = 12..=15;

/// Group samples by calendar date into daily summaries.
///
/// Samples are expected in ascending time order and are not re-sorted.
/// Days are emitted in order of first appearance, truncated to
/// [`MAX_FORECAST_DAYS`]. The first sample of a day provides the icon,
/// description and timestamp unless a sample in [`MIDDAY_HOURS`] exists,
/// in which case the last such sample wins.
pub fn summarize(samples: &[ForecastSample]) -> Vec<DailySummary> {
    let mut days: Vec<DailySummary> = Vec::new();

    for sample in samples {
        let date = sample.date();
        let index = match days.iter().position(|day| day.date == date) {
            Some(index) => {
                let day = &mut days[index];
                day.min_temperature = day.min_temperature.min(sample.temperature);
                day.max_temperature = day.max_temperature.max(sample.temperature);
                index
            }
            None => {
                days.push(DailySummary {
                    date,
                    representative_timestamp: sample.timestamp,
                    min_temperature: sample.temperature,
                    max_temperature: sample.temperature,
                    icon_code: sample.icon_code.clone(),
                    condition_description: sample.condition_description.clone(),
                });
                days.len() - 1
            }
        };

        if MIDDAY_HOURS.contains(&sample.local_hour()) {
            let day = &mut days[index];
            day.icon_code.clone_from(&sample.icon_code);
            day.condition_description
                .clone_from(&sample.condition_description);
            day.representative_timestamp = sample.timestamp;
        }
    }

    if days.len() > MAX_FORECAST_DAYS {
        tracing::trace!("Dropping {} forecast days", days.len() - MAX_FORECAST_DAYS);
        days.truncate(MAX_FORECAST_DAYS);
    }
    days
}
