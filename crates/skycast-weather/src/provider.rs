//! OpenWeatherMap client.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use tracing::instrument;

use skycast_core::{AppError, NetworkError, ReqwestErrorExt, WeatherConfig, WeatherError};

use crate::api::{ApiErrorBody, CurrentWeatherResponse, ForecastResponse};
use crate::forecast::summarize;
use crate::types::{CurrentConditions, ForecastSample, LocationQuery, WeatherSnapshot};

/// Anything that can produce a full snapshot for a location.
pub trait WeatherSource {
    fn fetch(
        &self,
        query: &LocationQuery,
    ) -> impl Future<Output = Result<WeatherSnapshot, AppError>> + Send;
}

#[derive(Debug, Clone)]
pub struct WeatherProvider {
    client: Arc<Client>,
    api_key: String,
    base_url: String,
}

impl WeatherProvider {
    pub fn new(config: &WeatherConfig) -> Result<Self, AppError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(|e| AppError::Network(e.into_network_error()))?;

        Ok(Self {
            client: Arc::new(client),
            api_key: config.api_key().to_string(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Current conditions. Temperatures are always requested in Celsius.
    #[instrument(skip(self), level = "info")]
    pub async fn current(&self, query: &LocationQuery) -> Result<CurrentConditions, AppError> {
        let response: CurrentWeatherResponse = self.get_json("weather", query).await?;
        Ok(CurrentConditions::try_from(response)?)
    }

    /// Raw 3-hourly forecast samples, in provider order.
    #[instrument(skip(self), level = "info")]
    pub async fn forecast(&self, query: &LocationQuery) -> Result<Vec<ForecastSample>, AppError> {
        let response: ForecastResponse = self.get_json("forecast", query).await?;
        Ok(response.into_samples()?)
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        query: &LocationQuery,
    ) -> Result<T, AppError> {
        let url = format!("{}/{}", self.base_url, endpoint);

        let mut params: Vec<(&str, String)> = match query {
            LocationQuery::City(name) => vec![("q", name.clone())],
            LocationQuery::Coordinates(coords) => vec![
                ("lat", coords.latitude.to_string()),
                ("lon", coords.longitude.to_string()),
            ],
        };
        params.push(("appid", self.api_key.clone()));
        params.push(("units", "metric".to_string()));

        let response = self
            .client
            .get(&url)
            .query(&params)
            .send()
            .await
            .map_err(|e| AppError::Network(e.into_network_error()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let err = classify_failure(status, &body, query);
            tracing::warn!("{} request failed with {}: {}", endpoint, status, err);
            return Err(err.into());
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| AppError::Network(e.into_network_error()))?;

        serde_json::from_slice(&bytes).map_err(|e| {
            tracing::debug!("Failed to decode {} response: {}", endpoint, e);
            AppError::Network(NetworkError::InvalidResponse(e.to_string()))
        })
    }
}

/// Map a non-2xx response to a weather error.
///
/// 404 only means "city not found" for name searches; for coordinates it is
/// reported like any other failure.
fn classify_failure(status: StatusCode, body: &str, query: &LocationQuery) -> WeatherError {
    if status == StatusCode::NOT_FOUND {
        if let LocationQuery::City(name) = query {
            return WeatherError::CityNotFound(name.clone());
        }
    }
    if status == StatusCode::UNAUTHORIZED {
        return WeatherError::InvalidApiKey;
    }
    if status == StatusCode::TOO_MANY_REQUESTS {
        return WeatherError::RateLimited;
    }

    WeatherError::ApiError {
        status: status.as_u16(),
        message: serde_json::from_str::<ApiErrorBody>(body)
            .ok()
            .and_then(|body| body.message),
    }
}

impl WeatherSource for WeatherProvider {
    /// Fetch current conditions and the daily forecast.
    ///
    /// Coordinate lookups run both requests concurrently. City searches fetch
    /// the forecast only after current conditions succeed, so an unknown city
    /// fails on the first request.
    async fn fetch(&self, query: &LocationQuery) -> Result<WeatherSnapshot, AppError> {
        let (current, samples) = match query {
            LocationQuery::Coordinates(_) => {
                tokio::try_join!(self.current(query), self.forecast(query))?
            }
            LocationQuery::City(_) => {
                let current = self.current(query).await?;
                (current, self.forecast(query).await?)
            }
        };

        let daily = summarize(&samples);
        tracing::info!(
            "Fetched weather for {} ({} samples, {} days)",
            current.city_name,
            samples.len(),
            daily.len()
        );

        Ok(WeatherSnapshot {
            current,
            daily,
            part_of_day: samples.first().and_then(|sample| sample.part_of_day),
            fetched_at: Utc::now(),
        })
    }
}
