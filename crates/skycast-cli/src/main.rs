use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use chrono::Utc;
use clap::{Parser, ValueEnum};
use skycast_core::{Config, TemperatureUnit};
use skycast_weather::{
    resolve_location, Coordinates, Dashboard, LocationSource, NoLocation, StaticLocation,
    WeatherProvider,
};

mod render;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum UnitArg {
    Celsius,
    Fahrenheit,
}

impl From<UnitArg> for TemperatureUnit {
    fn from(unit: UnitArg) -> Self {
        match unit {
            UnitArg::Celsius => TemperatureUnit::Celsius,
            UnitArg::Fahrenheit => TemperatureUnit::Fahrenheit,
        }
    }
}

#[derive(Parser)]
#[command(name = "skycast", author, version, about = "Current weather and a 5-day forecast", long_about = None)]
struct Cli {
    /// City to look up; without it the default location is shown
    city: Option<String>,

    /// Display unit (overrides the config file)
    #[arg(short, long, value_enum)]
    unit: Option<UnitArg>,

    /// Your latitude, tried after the default location is shown
    #[arg(long, requires = "lon", allow_hyphen_values = true)]
    lat: Option<f64>,

    /// Your longitude
    #[arg(long, requires = "lat", allow_hyphen_values = true)]
    lon: Option<f64>,

    /// Config file (defaults to the user config directory)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Print JSON instead of text
    #[arg(long)]
    json: bool,

    /// Turn debugging information on
    #[arg(short, long, action = clap::ArgAction::Count)]
    debug: u8,
}

fn print_state(dashboard: &Dashboard<WeatherProvider>, json: bool) -> Result<()> {
    let state = dashboard.state();
    let mut state = state.write();
    state.expire_notice(Utc::now());
    println!("{}", render::render(&state, json)?);
    Ok(())
}

/// Show the default location right away, then switch to the user's
/// location if it resolves within the configured wait.
async fn show_located<L: LocationSource>(
    dashboard: &Dashboard<WeatherProvider>,
    locator: &L,
    wait: Duration,
    json: bool,
) -> Result<()> {
    let locate = resolve_location(locator, wait, dashboard.default_location());
    let initial = async {
        let loaded = dashboard.load_default().await;
        print_state(dashboard, json)?;
        anyhow::Ok(loaded.is_ok())
    };

    let (resolved, initial) = tokio::join!(locate, initial);
    if !initial? {
        anyhow::bail!(
            "Could not load weather for {}",
            dashboard.default_location().name
        );
    }

    if !resolved.is_fallback && dashboard.show_user_location(resolved.coordinates).await {
        print_state(dashboard, json)?;
    }

    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = match cli.debug {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    skycast_core::init(level)?;

    let (mut config, _validation) = Config::load_validated(cli.config.as_deref())?;
    if let Some(unit) = cli.unit {
        config.weather.temperature_unit = unit.into();
    }

    let provider = WeatherProvider::new(&config.weather)?;
    let dashboard = Dashboard::new(provider, &config);
    tracing::info!("SkyCast started");

    if let Some(city) = cli.city {
        let searched = dashboard.search(&city).await;
        print_state(&dashboard, cli.json)?;
        searched?;
        return Ok(());
    }

    let wait = Duration::from_secs(config.weather.geolocation_timeout_secs);
    match (cli.lat, cli.lon) {
        (Some(lat), Some(lon)) => {
            let locator = StaticLocation(Coordinates::new(lat, lon));
            show_located(&dashboard, &locator, wait, cli.json).await
        }
        _ => show_located(&dashboard, &NoLocation, wait, cli.json).await,
    }
}
