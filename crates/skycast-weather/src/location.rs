//! Best-effort location lookup with a bounded wait.

use std::future::Future;
use std::time::Duration;

use skycast_core::DefaultLocation;

use crate::types::Coordinates;

/// Location service errors
#[derive(Debug, Clone, thiserror::Error)]
pub enum LocationError {
    #[error("Location service unavailable")]
    ServiceUnavailable,
    #[error("Location request timed out")]
    Timeout,
}

/// Something that can report where the user is.
pub trait LocationSource {
    fn current_location(&self) -> impl Future<Output = Result<Coordinates, LocationError>> + Send;
}

/// A location known up front (e.g. passed on the command line).
#[derive(Debug, Clone, Copy)]
pub struct StaticLocation(pub Coordinates);

impl LocationSource for StaticLocation {
    async fn current_location(&self) -> Result<Coordinates, LocationError> {
        Ok(self.0)
    }
}

/// No location service on this host.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoLocation;

impl LocationSource for NoLocation {
    async fn current_location(&self) -> Result<Coordinates, LocationError> {
        Err(LocationError::ServiceUnavailable)
    }
}

/// Outcome of [`resolve_location`].
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedLocation {
    pub coordinates: Coordinates,
    /// Set when the default location was substituted
    pub is_fallback: bool,
}

/// Ask `source` for the user's location, waiting at most `timeout`.
///
/// Any failure or timeout yields the configured default location.
pub async fn resolve_location<S: LocationSource>(
    source: &S,
    timeout: Duration,
    fallback: &DefaultLocation,
) -> ResolvedLocation {
    let outcome = match tokio::time::timeout(timeout, source.current_location()).await {
        Ok(result) => result,
        Err(_) => Err(LocationError::Timeout),
    };

    match outcome {
        Ok(coordinates) => {
            tracing::info!(
                "Got location: {}, {}",
                coordinates.latitude,
                coordinates.longitude
            );
            ResolvedLocation {
                coordinates,
                is_fallback: false,
            }
        }
        Err(e) => {
            tracing::debug!("User location not available ({}), using {}", e, fallback.name);
            ResolvedLocation {
                coordinates: Coordinates::from(fallback),
                is_fallback: true,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct SlowLocation;

    impl LocationSource for SlowLocation {
        async fn current_location(&self) -> Result<Coordinates, LocationError> {
            tokio::time::sleep(Duration::from_secs(60)).await;
            Ok(Coordinates::new(1.0, 1.0))
        }
    }

    #[tokio::test]
    async fn test_static_location_is_used() {
        let here = Coordinates::new(51.5, -0.12);
        let resolved =
            resolve_location(&StaticLocation(here), Duration::from_secs(5), &DefaultLocation::default())
                .await;
        assert_eq!(resolved.coordinates, here);
        assert!(!resolved.is_fallback);
    }

    #[tokio::test]
    async fn test_unavailable_falls_back() {
        let fallback = DefaultLocation::default();
        let resolved = resolve_location(&NoLocation, Duration::from_secs(5), &fallback).await;
        assert!(resolved.is_fallback);
        assert_eq!(resolved.coordinates, Coordinates::new(40.7128, -74.0060));
    }

    #[tokio::test(start_paused = true)]
    async fn test_timeout_falls_back() {
        let resolved =
            resolve_location(&SlowLocation, Duration::from_secs(5), &DefaultLocation::default())
                .await;
        assert!(resolved.is_fallback);
    }
}
