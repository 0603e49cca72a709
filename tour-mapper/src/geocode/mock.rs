//! Mock geocoder for testing without network access.

use std::collections::HashMap;

use geo::Point;

use crate::trip::Geocoder;

use super::error::GeocodeError;

/// Mock geocoder backed by an in-memory name table.
///
/// Names absent from the table resolve to `None`, mirroring the real
/// service's empty search result.
#[derive(Debug, Clone, Default)]
pub struct MockGeocoder {
    places: HashMap<String, Point<f64>>,
    unavailable: bool,
}

impl MockGeocoder {
    /// Create an empty mock geocoder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a place and its WGS84 longitude/latitude.
    pub fn with_place(mut self, name: impl Into<String>, lon: f64, lat: f64) -> Self {
        self.places.insert(name.into(), Point::new(lon, lat));
        self
    }

    /// Create a mock that fails every lookup, simulating an unreachable
    /// service.
    pub fn offline() -> Self {
        Self {
            places: HashMap::new(),
            unavailable: true,
        }
    }
}

impl Geocoder for MockGeocoder {
    async fn lookup(&self, name: &str) -> Result<Option<Point<f64>>, GeocodeError> {
        if self.unavailable {
            return Err(GeocodeError::ServiceUnavailable {
                message: "mock geocoder offline".to_string(),
            });
        }
        Ok(self.places.get(name).copied())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn known_name_resolves() {
        let mock = MockGeocoder::new().with_place("Leipzig", 12.37, 51.34);

        let point = mock.lookup("Leipzig").await.unwrap().unwrap();
        assert_eq!(point, Point::new(12.37, 51.34));
    }

    #[tokio::test]
    async fn unknown_name_resolves_to_none() {
        let mock = MockGeocoder::new().with_place("Leipzig", 12.37, 51.34);
        assert!(mock.lookup("NoSuchPlaceXYZ123").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn offline_mock_errors() {
        let mock = MockGeocoder::offline();
        let result = mock.lookup("Leipzig").await;
        assert!(matches!(result, Err(GeocodeError::ServiceUnavailable { .. })));
    }
}
