//! Particle density for the animated backdrop.
//!
//! Only counts and angles are decided here; placement and timing are left to
//! the renderer.

use serde::Serialize;

use crate::types::CurrentConditions;

const MAX_RAIN_ANGLE_DEGREES: f64 = 30.0;
const MAX_SNOWFLAKES: u32 = 100;
/// Cloud cover (percent) above which clouds drift across the backdrop.
const CLOUD_COVER_THRESHOLD: u8 = 20;

/// Particles to draw for the current conditions.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct ParticlePlan {
    pub raindrops: u32,
    /// Slant of the rain in degrees, driven by wind speed
    pub rain_angle: f64,
    pub snowflakes: u32,
    pub clouds: u32,
}

impl ParticlePlan {
    pub fn for_conditions(current: &CurrentConditions) -> Self {
        let mut plan = Self::default();

        match current.condition_main.as_str() {
            "Rain" | "Drizzle" | "Thunderstorm" => {
                plan.raindrops = raindrops_for(current.rain_mm);
                plan.rain_angle = (current.wind_speed * 3.0).clamp(0.0, MAX_RAIN_ANGLE_DEGREES);
            }
            "Snow" => {
                let extra = (current.rain_mm.max(0.0) * 10.0).floor() as u32;
                plan.snowflakes = (50 + extra).min(MAX_SNOWFLAKES);
            }
            _ => {}
        }

        if current.cloudiness > CLOUD_COVER_THRESHOLD {
            let cover = f64::from(current.cloudiness.min(100)) / 100.0;
            plan.clouds = (cover * 6.0).floor() as u32 + 2;
        }

        plan
    }

}

fn raindrops_for(rain_mm: f64) -> u32 {
    if rain_mm > 7.0 {
        120
    } else if rain_mm > 2.0 {
        60
    } else if rain_mm > 0.5 {
        40
    } else {
        30
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn conditions(main: &str, rain_mm: f64, wind_speed: f64, cloudiness: u8) -> CurrentConditions {
        CurrentConditions {
            city_name: "Test".into(),
            country: "US".into(),
            temperature: 10.0,
            feels_like: 9.0,
            humidity: 50,
            wind_speed,
            cloudiness,
            rain_mm,
            condition_main: main.into(),
            condition_description: String::new(),
            icon_code: "01d".into(),
            observed_at: 0,
            sunrise: 0,
            sunset: 0,
        }
    }

    #[test]
    fn test_rain_intensity_steps() {
        assert_eq!(ParticlePlan::for_conditions(&conditions("Rain", 0.0, 0.0, 0)).raindrops, 30);
        assert_eq!(ParticlePlan::for_conditions(&conditions("Rain", 1.0, 0.0, 0)).raindrops, 40);
        assert_eq!(ParticlePlan::for_conditions(&conditions("Drizzle", 3.0, 0.0, 0)).raindrops, 60);
        assert_eq!(
            ParticlePlan::for_conditions(&conditions("Thunderstorm", 8.0, 0.0, 0)).raindrops,
            120
        );
    }

    #[test]
    fn test_rain_angle_capped() {
        let plan = ParticlePlan::for_conditions(&conditions("Rain", 1.0, 4.0, 0));
        assert_eq!(plan.rain_angle, 12.0);
        let plan = ParticlePlan::for_conditions(&conditions("Rain", 1.0, 25.0, 0));
        assert_eq!(plan.rain_angle, 30.0);
    }

    #[test]
    fn test_snowflakes_capped() {
        assert_eq!(ParticlePlan::for_conditions(&conditions("Snow", 0.0, 0.0, 0)).snowflakes, 50);
        assert_eq!(ParticlePlan::for_conditions(&conditions("Snow", 2.0, 0.0, 0)).snowflakes, 70);
        assert_eq!(ParticlePlan::for_conditions(&conditions("Snow", 9.0, 0.0, 0)).snowflakes, 100);
    }

    #[test]
    fn test_clouds_scale_with_cover() {
        assert_eq!(ParticlePlan::for_conditions(&conditions("Clouds", 0.0, 0.0, 21)).clouds, 3);
        assert_eq!(ParticlePlan::for_conditions(&conditions("Clouds", 0.0, 0.0, 100)).clouds, 8);
    }

    #[test]
    fn test_clouds_follow_cover_not_condition() {
        let rain = ParticlePlan::for_conditions(&conditions("Rain", 1.0, 0.0, 90));
        assert_eq!(rain.clouds, 7);
        assert_eq!(rain.raindrops, 40);

        assert_eq!(ParticlePlan::for_conditions(&conditions("Clouds", 0.0, 0.0, 10)).clouds, 0);
        assert_eq!(ParticlePlan::for_conditions(&conditions("Clouds", 0.0, 0.0, 20)).clouds, 0);
    }

    #[test]
    fn test_clear_sky_is_empty() {
        assert_eq!(
            ParticlePlan::for_conditions(&conditions("Clear", 0.0, 3.0, 0)),
            ParticlePlan::default()
        );
    }
}
