//! Mock router for testing without network access.

use std::time::Duration;

use geo::{LineString, Point};

use crate::domain::{Profile, RouteSummary};
use crate::trip::RouteProvider;

use super::error::RoutingError;

/// Coordinate match tolerance for registered routes.
const EPSILON: f64 = 1e-6;

#[derive(Debug, Clone)]
struct MockRoute {
    origin: Point<f64>,
    destination: Point<f64>,
    delay: Duration,
    /// `None` simulates the service's "no route between points" outcome.
    outcome: Option<RouteSummary>,
}

/// Mock router backed by a table of registered point pairs.
///
/// Requests for unregistered pairs fail loudly so tests notice missing
/// registrations. Per-route delays let tests exercise out-of-order
/// completion of concurrent requests.
#[derive(Debug, Clone, Default)]
pub struct MockRouter {
    routes: Vec<MockRoute>,
    unavailable: bool,
}

impl MockRouter {
    /// Create an empty mock router.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a route between two points with a straight-line path.
    pub fn with_route(
        self,
        origin: Point<f64>,
        destination: Point<f64>,
        distance_meters: f64,
        duration_minutes: f64,
    ) -> Self {
        self.with_route_delayed(origin, destination, distance_meters, duration_minutes, 0)
    }

    /// Register a route whose response arrives after a delay.
    pub fn with_route_delayed(
        mut self,
        origin: Point<f64>,
        destination: Point<f64>,
        distance_meters: f64,
        duration_minutes: f64,
        delay_ms: u64,
    ) -> Self {
        let path = LineString::from(vec![
            (origin.x(), origin.y()),
            (destination.x(), destination.y()),
        ]);
        self.routes.push(MockRoute {
            origin,
            destination,
            delay: Duration::from_millis(delay_ms),
            outcome: Some(RouteSummary {
                path,
                distance_meters,
                duration_minutes,
            }),
        });
        self
    }

    /// Register a pair of points with no route between them.
    pub fn with_no_route(mut self, origin: Point<f64>, destination: Point<f64>) -> Self {
        self.routes.push(MockRoute {
            origin,
            destination,
            delay: Duration::ZERO,
            outcome: None,
        });
        self
    }

    /// Create a mock that fails every request, simulating an unreachable
    /// service.
    pub fn offline() -> Self {
        Self {
            routes: Vec::new(),
            unavailable: true,
        }
    }

    fn find(&self, origin: Point<f64>, destination: Point<f64>) -> Option<&MockRoute> {
        self.routes.iter().find(|route| {
            close(route.origin, origin) && close(route.destination, destination)
        })
    }
}

fn close(a: Point<f64>, b: Point<f64>) -> bool {
    (a.x() - b.x()).abs() < EPSILON && (a.y() - b.y()).abs() < EPSILON
}

impl RouteProvider for MockRouter {
    async fn route(
        &self,
        _profile: Profile,
        origin: Point<f64>,
        destination: Point<f64>,
    ) -> Result<Option<RouteSummary>, RoutingError> {
        if self.unavailable {
            return Err(RoutingError::ServiceUnavailable {
                message: "mock router offline".to_string(),
            });
        }

        let route = self
            .find(origin, destination)
            .ok_or_else(|| RoutingError::Service {
                code: "NoMatch".to_string(),
                message: format!(
                    "no mock route registered from ({}, {}) to ({}, {})",
                    origin.x(),
                    origin.y(),
                    destination.x(),
                    destination.y()
                ),
            })?;

        if !route.delay.is_zero() {
            tokio::time::sleep(route.delay).await;
        }

        Ok(route.outcome.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn registered_route_resolves() {
        let origin = Point::new(12.37, 51.34);
        let destination = Point::new(12.08, 51.26);
        let mock = MockRouter::new().with_route(origin, destination, 21_500.0, 95.0);

        let summary = mock
            .route(Profile::Bike, origin, destination)
            .await
            .unwrap()
            .unwrap();

        assert_eq!(summary.distance_meters, 21_500.0);
        assert_eq!(summary.path.0.len(), 2);
    }

    #[tokio::test]
    async fn no_route_pair_resolves_to_none() {
        let origin = Point::new(12.37, 51.34);
        let destination = Point::new(12.08, 51.26);
        let mock = MockRouter::new().with_no_route(origin, destination);

        assert!(mock
            .route(Profile::Bike, origin, destination)
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn unregistered_pair_errors() {
        let mock = MockRouter::new();
        let result = mock
            .route(Profile::Bike, Point::new(0.0, 0.0), Point::new(1.0, 1.0))
            .await;

        assert!(matches!(result, Err(RoutingError::Service { .. })));
    }

    #[tokio::test]
    async fn offline_mock_errors() {
        let mock = MockRouter::offline();
        let result = mock
            .route(Profile::Bike, Point::new(0.0, 0.0), Point::new(1.0, 1.0))
            .await;

        assert!(matches!(result, Err(RoutingError::ServiceUnavailable { .. })));
    }
}
