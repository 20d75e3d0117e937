//! Centralized error types for SkyCast.
//!
//! This module provides a typed error hierarchy that:
//! - Classifies upstream failures into a small set of kinds
//! - Provides user-friendly messages suitable for transient notices
//! - Preserves full error context for logging

use thiserror::Error;

/// Coarse classification of a failure, used to pick how it is surfaced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The requested city or resource does not exist upstream.
    NotFound,
    /// The API key was rejected.
    Unauthorized,
    /// The provider is throttling requests.
    RateLimited,
    /// Any other upstream or local failure.
    Failure,
    /// The provider could not be reached at all.
    Unreachable,
}

/// Top-level application error type.
///
/// Use `user_message()` to get a notice-appropriate message and `kind()`
/// to classify it.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Network error: {0}")]
    Network(#[from] NetworkError),

    #[error("Weather service error: {0}")]
    Weather(#[from] WeatherError),
}

impl AppError {
    /// Returns a user-friendly message suitable for display.
    pub fn user_message(&self) -> String {
        match self {
            AppError::Network(e) => e.user_message().to_string(),
            AppError::Weather(e) => e.user_message(),
        }
    }

    /// Classify this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            AppError::Network(e) => e.kind(),
            AppError::Weather(e) => e.kind(),
        }
    }
}

/// Network-related errors (HTTP, connectivity).
#[derive(Debug, Error)]
pub enum NetworkError {
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    #[error("Request timed out")]
    Timeout,

    #[error("Server error: {status} - {message}")]
    ServerError { status: u16, message: String },

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

impl NetworkError {
    pub fn user_message(&self) -> &'static str {
        match self {
            NetworkError::ConnectionFailed(_) | NetworkError::Timeout => {
                "Network error. Please check your internet connection."
            }
            NetworkError::ServerError { status, .. } if *status >= 500 => {
                "The weather service is experiencing issues. Please try again later."
            }
            NetworkError::ServerError { .. } => "Failed to fetch weather data. Please try again.",
            NetworkError::InvalidResponse(_) => {
                "Received an unexpected response. Please try again."
            }
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            NetworkError::ConnectionFailed(_) | NetworkError::Timeout => ErrorKind::Unreachable,
            NetworkError::ServerError { .. } | NetworkError::InvalidResponse(_) => {
                ErrorKind::Failure
            }
        }
    }
}

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Configuration parse error: {0}")]
    ParseError(String),
}

/// Weather service errors.
#[derive(Debug, Error)]
pub enum WeatherError {
    #[error("City not found: {0}")]
    CityNotFound(String),

    #[error("Invalid API key")]
    InvalidApiKey,

    #[error("Rate limited")]
    RateLimited,

    #[error("Weather API error: {status}")]
    ApiError {
        status: u16,
        message: Option<String>,
    },

    #[error("Invalid forecast sample: {0}")]
    InvalidSample(String),

    #[error("Invalid search: {0}")]
    InvalidQuery(String),
}

impl WeatherError {
    pub fn user_message(&self) -> String {
        match self {
            WeatherError::CityNotFound(_) => {
                "City not found. Please check the spelling and try again.".to_string()
            }
            WeatherError::InvalidApiKey => {
                "API key is invalid. Please check your configuration.".to_string()
            }
            WeatherError::RateLimited => "Too many requests. Please try again later.".to_string(),
            WeatherError::ApiError {
                message: Some(message),
                ..
            } if !message.is_empty() => message.clone(),
            WeatherError::ApiError { .. } => {
                "Failed to fetch weather data. Please try again.".to_string()
            }
            WeatherError::InvalidSample(_) => {
                "Received an unexpected response. Please try again.".to_string()
            }
            // Validation messages are already written for the user.
            WeatherError::InvalidQuery(message) => message.clone(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            WeatherError::CityNotFound(_) => ErrorKind::NotFound,
            WeatherError::InvalidApiKey => ErrorKind::Unauthorized,
            WeatherError::RateLimited => ErrorKind::RateLimited,
            WeatherError::ApiError { .. }
            | WeatherError::InvalidSample(_)
            | WeatherError::InvalidQuery(_) => ErrorKind::Failure,
        }
    }
}

/// Extension trait for converting reqwest errors to our error types.
pub trait ReqwestErrorExt {
    fn into_network_error(self) -> NetworkError;
}

impl ReqwestErrorExt for reqwest::Error {
    fn into_network_error(self) -> NetworkError {
        if self.is_timeout() {
            NetworkError::Timeout
        } else if self.is_connect() {
            NetworkError::ConnectionFailed(self.to_string())
        } else if self.is_decode() {
            NetworkError::InvalidResponse(self.to_string())
        } else if let Some(status) = self.status() {
            NetworkError::ServerError {
                status: status.as_u16(),
                message: self.to_string(),
            }
        } else {
            NetworkError::ConnectionFailed(self.to_string())
        }
    }
}
