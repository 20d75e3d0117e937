//! Terminal output for the dashboard.

use std::fmt::Write as _;

use chrono::{Local, TimeZone};
use serde::Serialize;
use skycast_weather::{CurrentView, DashboardState, DayView, ParticlePlan};

#[derive(Debug, Serialize)]
struct Rendered {
    background: &'static str,
    gradient: &'static str,
    particles: ParticlePlan,
    current: Option<CurrentView>,
    forecast: Vec<DayView>,
    notice: Option<String>,
}

fn collect<Tz: TimeZone>(state: &DashboardState, tz: &Tz) -> Rendered
where
    Tz::Offset: std::fmt::Display,
{
    Rendered {
        background: state.background.id(),
        gradient: state.background.gradient(),
        particles: state.particles,
        current: state.current_view(tz),
        forecast: state.day_views(tz),
        notice: state.notice.as_ref().map(|n| n.message.clone()),
    }
}

fn text(rendered: &Rendered) -> String {
    let mut out = String::new();

    if let Some(current) = &rendered.current {
        let _ = writeln!(
            out,
            "{}  {}  {}",
            current.location, current.temperature, current.description
        );
        let _ = writeln!(
            out,
            "Feels like {} · Humidity {} · Wind {}",
            current.feels_like, current.humidity, current.wind
        );
        let _ = writeln!(out, "Sunrise {} · Sunset {}", current.sunrise, current.sunset);
        let _ = writeln!(out, "Background: {}", rendered.background);
    }

    if !rendered.forecast.is_empty() {
        let _ = writeln!(out, "\n5-Day Forecast");
        for day in &rendered.forecast {
            let _ = writeln!(
                out,
                "{:<12} {:>6} / {:<6} {}",
                day.label, day.high, day.low, day.description
            );
        }
    }

    if let Some(notice) = &rendered.notice {
        let _ = writeln!(out, "\n! {}", notice);
    }

    out
}

/// Render as plain text or JSON in the local time zone.
pub fn render(state: &DashboardState, json: bool) -> anyhow::Result<String> {
    let rendered = collect(state, &Local);
    if json {
        Ok(serde_json::to_string_pretty(&rendered)?)
    } else {
        Ok(text(&rendered))
    }
}
