//! OpenWeatherMap 2.5 wire types and their conversion into domain types.

use serde::Deserialize;

use skycast_core::WeatherError;

use crate::types::{CurrentConditions, ForecastSample, PartOfDay};

#[derive(Debug, Clone, Deserialize)]
pub struct ApiCondition {
    pub main: String,
    pub description: String,
    pub icon: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiMain {
    pub temp: f64,
    #[serde(default)]
    pub feels_like: Option<f64>,
    #[serde(default)]
    pub humidity: Option<u8>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApiWind {
    #[serde(default)]
    pub speed: f64,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApiClouds {
    #[serde(default)]
    pub all: u8,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApiPrecipitation {
    #[serde(rename = "1h", default)]
    pub one_hour: Option<f64>,
    #[serde(rename = "3h", default)]
    pub three_hours: Option<f64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiCurrentSys {
    #[serde(default)]
    pub country: Option<String>,
    /// Zero or missing during polar day and night
    #[serde(default)]
    pub sunrise: i64,
    #[serde(default)]
    pub sunset: i64,
}

/// `GET /weather`
#[derive(Debug, Clone, Deserialize)]
pub struct CurrentWeatherResponse {
    pub weather: Vec<ApiCondition>,
    pub main: ApiMain,
    #[serde(default)]
    pub wind: ApiWind,
    #[serde(default)]
    pub clouds: ApiClouds,
    #[serde(default)]
    pub rain: Option<ApiPrecipitation>,
    pub dt: i64,
    pub sys: ApiCurrentSys,
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiPod {
    pub pod: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiForecastItem {
    pub dt: i64,
    pub main: ApiMain,
    pub weather: Vec<ApiCondition>,
    #[serde(default)]
    pub sys: Option<ApiPod>,
    pub dt_txt: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiCity {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub country: Option<String>,
}

/// `GET /forecast`
#[derive(Debug, Clone, Deserialize)]
pub struct ForecastResponse {
    pub list: Vec<ApiForecastItem>,
    #[serde(default)]
    pub city: Option<ApiCity>,
}

/// Error body returned alongside non-2xx statuses.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApiErrorBody {
    #[serde(default)]
    pub message: Option<String>,
}

fn primary_condition(conditions: Vec<ApiCondition>, context: &str) -> Result<ApiCondition, WeatherError> {
    conditions
        .into_iter()
        .next()
        .ok_or_else(|| WeatherError::InvalidSample(format!("{} has no weather condition", context)))
}

impl TryFrom<CurrentWeatherResponse> for CurrentConditions {
    type Error = WeatherError;

    fn try_from(response: CurrentWeatherResponse) -> Result<Self, Self::Error> {
        let condition = primary_condition(response.weather, "current weather")?;
        let rain_mm = response
            .rain
            .and_then(|rain| rain.one_hour.filter(|mm| *mm > 0.0).or(rain.three_hours))
            .unwrap_or(0.0);

        Ok(Self {
            city_name: response.name,
            country: response.sys.country.unwrap_or_default(),
            temperature: response.main.temp,
            feels_like: response.main.feels_like.unwrap_or(response.main.temp),
            humidity: response.main.humidity.unwrap_or(0),
            wind_speed: response.wind.speed,
            cloudiness: response.clouds.all,
            rain_mm,
            condition_main: condition.main,
            condition_description: condition.description,
            icon_code: condition.icon,
            observed_at: response.dt,
            sunrise: response.sys.sunrise,
            sunset: response.sys.sunset,
        })
    }
}

impl TryFrom<ApiForecastItem> for ForecastSample {
    type Error = WeatherError;

    fn try_from(item: ApiForecastItem) -> Result<Self, Self::Error> {
        let condition = primary_condition(item.weather, &item.dt_txt)?;
        let part_of_day = item.sys.and_then(|sys| PartOfDay::from_flag(&sys.pod));

        Ok(ForecastSample::new(
            item.dt,
            &item.dt_txt,
            item.main.temp,
            condition.main,
            condition.description,
            condition.icon,
        )?
        .with_part_of_day(part_of_day))
    }
}

impl ForecastResponse {
    /// Convert every list entry, failing on the first malformed one.
    pub fn into_samples(self) -> Result<Vec<ForecastSample>, WeatherError> {
        self.list.into_iter().map(ForecastSample::try_from).collect()
    }
}

/// URL of the provider's icon image for `icon_code`.
pub fn icon_url(icon_code: &str) -> String {
    format!("https://openweathermap.org/img/wn/{}@2x.png", icon_code)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn current_json() -> serde_json::Value {
        serde_json::json!({
            "coord": { "lon": -74.006, "lat": 40.7128 },
            "weather": [{ "id": 500, "main": "Rain", "description": "light rain", "icon": "10d" }],
            "base": "stations",
            "main": { "temp": 12.3, "feels_like": 11.0, "humidity": 81, "pressure": 1012 },
            "visibility": 10000,
            "wind": { "speed": 4.1, "deg": 200 },
            "clouds": { "all": 75 },
            "rain": { "3h": 1.2 },
            "dt": 1704117600,
            "sys": { "country": "US", "sunrise": 1704110000, "sunset": 1704144000 },
            "timezone": -18000,
            "id": 5128581,
            "name": "New York",
            "cod": 200
        })
    }

    #[test]
    fn test_current_conversion() {
        let response: CurrentWeatherResponse = serde_json::from_value(current_json()).unwrap();
        let current = CurrentConditions::try_from(response).unwrap();

        assert_eq!(current.city_name, "New York");
        assert_eq!(current.country, "US");
        assert_eq!(current.condition_main, "Rain");
        assert_eq!(current.humidity, 81);
        assert_eq!(current.cloudiness, 75);
        assert_eq!(current.rain_mm, 1.2);
        assert_eq!(current.sunset, 1704144000);
    }

    #[test]
    fn test_current_prefers_one_hour_rain() {
        let mut json = current_json();
        json["rain"] = serde_json::json!({ "1h": 0.4, "3h": 1.2 });
        let response: CurrentWeatherResponse = serde_json::from_value(json).unwrap();
        assert_eq!(CurrentConditions::try_from(response).unwrap().rain_mm, 0.4);
    }

    #[test]
    fn test_zero_one_hour_rain_falls_back_to_three_hours() {
        let mut json = current_json();
        json["rain"] = serde_json::json!({ "1h": 0.0, "3h": 1.2 });
        let response: CurrentWeatherResponse = serde_json::from_value(json).unwrap();
        assert_eq!(CurrentConditions::try_from(response).unwrap().rain_mm, 1.2);
    }

    #[test]
    fn test_current_without_condition_is_rejected() {
        let mut json = current_json();
        json["weather"] = serde_json::json!([]);
        let response: CurrentWeatherResponse = serde_json::from_value(json).unwrap();
        assert!(matches!(
            CurrentConditions::try_from(response),
            Err(WeatherError::InvalidSample(_))
        ));
    }

    #[test]
    fn test_forecast_item_conversion() {
        let item: ApiForecastItem = serde_json::from_value(serde_json::json!({
            "dt": 1704110400,
            "main": { "temp": 8.0, "temp_min": 7.0, "temp_max": 9.0 },
            "weather": [{ "id": 800, "main": "Clear", "description": "clear sky", "icon": "01d" }],
            "sys": { "pod": "d" },
            "dt_txt": "2024-01-01 12:00:00"
        }))
        .unwrap();

        let sample = ForecastSample::try_from(item).unwrap();
        assert_eq!(sample.local_hour(), 12);
        assert_eq!(sample.part_of_day, Some(PartOfDay::Day));
        assert_eq!(sample.icon_code, "01d");
    }

    #[test]
    fn test_icon_url() {
        assert_eq!(icon_url("10n"), "https://openweathermap.org/img/wn/10n@2x.png");
    }
}
