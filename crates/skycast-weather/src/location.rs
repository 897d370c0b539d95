//! Device position lookup.

use crate::types::{Coordinates, LocationError};
use std::future::Future;
use std::time::Duration;

/// Source of the device's current position.
pub trait Geolocator: Send + Sync {
    fn current_position(&self) -> impl Future<Output = Result<Coordinates, LocationError>> + Send;
}

/// Geolocator with a fixed answer: a configured position, a denial, or no service.
#[derive(Debug, Clone)]
pub struct StaticGeolocator {
    outcome: Result<Coordinates, LocationError>,
}

impl StaticGeolocator {
    pub fn at(coordinates: Coordinates) -> Self {
        Self {
            outcome: Ok(coordinates),
        }
    }

    pub fn denied() -> Self {
        Self {
            outcome: Err(LocationError::PermissionDenied),
        }
    }

    pub fn unavailable() -> Self {
        Self {
            outcome: Err(LocationError::ServiceUnavailable),
        }
    }

    /// Build from an optional raw (latitude, longitude) pair.
    pub fn from_position(position: Option<(f64, f64)>) -> Self {
        match position {
            Some((lat, lon)) => match Coordinates::new(lat, lon) {
                Ok(coordinates) => Self::at(coordinates),
                Err(e) => Self {
                    outcome: Err(LocationError::Other(e.to_string())),
                },
            },
            None => Self::unavailable(),
        }
    }
}

impl Geolocator for StaticGeolocator {
    async fn current_position(&self) -> Result<Coordinates, LocationError> {
        self.outcome.clone()
    }
}

/// Ask for the current position, giving up after `timeout`.
pub async fn locate_within<G: Geolocator>(
    geolocator: &G,
    timeout: Duration,
) -> Result<Coordinates, LocationError> {
    match tokio::time::timeout(timeout, geolocator.current_position()).await {
        Ok(result) => result,
        Err(_) => {
            tracing::warn!("Geolocation timed out after {:?}", timeout);
            Err(LocationError::Timeout)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct NeverResponds;

    impl Geolocator for NeverResponds {
        async fn current_position(&self) -> Result<Coordinates, LocationError> {
            std::future::pending().await
        }
    }

    #[tokio::test]
    async fn test_static_position() {
        let coords = Coordinates::new(18.52, 73.86).unwrap();
        let geo = StaticGeolocator::at(coords);
        assert_eq!(geo.current_position().await, Ok(coords));
    }

    #[tokio::test]
    async fn test_from_position_without_value_is_unavailable() {
        let geo = StaticGeolocator::from_position(None);
        assert_eq!(
            geo.current_position().await,
            Err(LocationError::ServiceUnavailable)
        );
    }

    #[tokio::test]
    async fn test_from_position_out_of_range() {
        let geo = StaticGeolocator::from_position(Some((123.0, 0.0)));
        assert!(matches!(
            geo.current_position().await,
            Err(LocationError::Other(_))
        ));
    }

    #[tokio::test]
    async fn test_denied() {
        let result = locate_within(&StaticGeolocator::denied(), Duration::from_secs(1)).await;
        assert_eq!(result, Err(LocationError::PermissionDenied));
    }

    #[tokio::test]
    async fn test_timeout_bounds_lookup() {
        let result = locate_within(&NeverResponds, Duration::from_millis(20)).await;
        assert_eq!(result, Err(LocationError::Timeout));
    }
}
