//! End-to-end trip assembly.

use tracing::info;

use crate::domain::{Leg, Stop, TripStatistics, aggregate, build_legs};
use crate::geocode::GeocodeError;
use crate::regions::RegionError;
use crate::routing::RoutingError;

use super::resolve::LegFailure;
use super::{Geocoder, RouteProvider, TripConfig, geocode_stops, resolve_legs, select_day};

/// Error from trip assembly, tagged with the failing stage.
#[derive(Debug, thiserror::Error)]
pub enum PlanError {
    /// Boundary dataset failed to load or filter
    #[error("region stage failed: {0}")]
    Regions(#[from] RegionError),

    /// Geocoding service failed
    #[error("geocoding stage failed: {0}")]
    Geocoding(#[from] GeocodeError),

    /// Routing service failed
    #[error("routing stage failed: {0}")]
    Routing(#[from] RoutingError),

    /// Leg construction failed (drop-and-reindex was skipped upstream)
    #[error("leg construction failed: {0}")]
    Domain(#[from] crate::domain::DomainError),

    /// Too few stops survived geocoding to build any leg
    #[error("only {resolved} stop(s) geocoded; at least 2 are required to build a route")]
    InsufficientStops { resolved: usize },
}

/// A fully assembled trip.
///
/// Partial success is a valid terminal state: legs the routing service could
/// not connect stay in `legs` unrouted and are listed in `failures`; the
/// statistics exclude them.
#[derive(Debug, Clone)]
pub struct TripPlan {
    /// Geocoded stops, densely indexed in trip order.
    pub stops: Vec<Stop>,

    /// One leg per adjacent stop pair, in trip order.
    pub legs: Vec<Leg>,

    /// Per-leg routing gaps.
    pub failures: Vec<LegFailure>,

    /// Whole-trip distance/duration totals.
    pub statistics: TripStatistics,
}

impl TripPlan {
    /// Number of days in the trip (one leg per day).
    pub fn day_count(&self) -> usize {
        self.legs.len()
    }

    /// Statistics for a single day's legs.
    pub fn day_statistics(&self, day: usize) -> TripStatistics {
        aggregate(&select_day(&self.legs, day))
    }
}

/// Assemble a trip from an ordered list of stop names.
///
/// Geocodes the stops (dropping unresolved names), pairs the survivors into
/// legs, requests a route per leg and aggregates the totals.
///
/// # Errors
///
/// Fails fast when either external service is unavailable, or with
/// [`PlanError::InsufficientStops`] when fewer than two stops survive
/// geocoding. Per-leg routing gaps do not fail the plan.
pub async fn plan<G: Geocoder, R: RouteProvider>(
    geocoder: &G,
    router: &R,
    names: &[String],
    config: &TripConfig,
) -> Result<TripPlan, PlanError> {
    let stops = geocode_stops(geocoder, names, config.target_srs).await?;

    if stops.len() < 2 {
        return Err(PlanError::InsufficientStops {
            resolved: stops.len(),
        });
    }

    let legs = build_legs(&stops)?;
    let resolved = resolve_legs(router, legs, config.profile).await?;
    let statistics = aggregate(&resolved.legs);

    info!(
        stops = stops.len(),
        legs = resolved.legs.len(),
        unrouted = resolved.failures.len(),
        distance = %statistics.formatted_distance(),
        duration = %statistics.formatted_duration(),
        "trip assembled"
    );

    Ok(TripPlan {
        stops,
        legs: resolved.legs,
        failures: resolved.failures,
        statistics,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Srs;
    use crate::geocode::MockGeocoder;
    use crate::routing::MockRouter;
    use geo::Point;

    const LEIPZIG: (f64, f64) = (12.3747, 51.3406);
    const LUETZEN: (f64, f64) = (12.1410, 51.2589);
    const WEISSENFELS: (f64, f64) = (11.9690, 51.2016);
    const NAUMBURG: (f64, f64) = (11.8098, 51.1520);

    fn point(coords: (f64, f64)) -> Point<f64> {
        Point::new(coords.0, coords.1)
    }

    fn names(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    fn geocoder() -> MockGeocoder {
        MockGeocoder::new()
            .with_place("Leipzig", LEIPZIG.0, LEIPZIG.1)
            .with_place("Lützen", LUETZEN.0, LUETZEN.1)
            .with_place("Weißenfels", WEISSENFELS.0, WEISSENFELS.1)
            .with_place("Naumburg", NAUMBURG.0, NAUMBURG.1)
    }

    fn wgs84_config() -> TripConfig {
        TripConfig {
            target_srs: Srs::Wgs84,
            ..TripConfig::default()
        }
    }

    #[tokio::test]
    async fn three_stops_make_two_routed_legs() {
        let router = MockRouter::new()
            .with_route(point(LEIPZIG), point(LUETZEN), 21_500.0, 95.0)
            .with_route(point(LUETZEN), point(WEISSENFELS), 14_200.0, 60.0);

        let plan = plan(
            &geocoder(),
            &router,
            &names(&["Leipzig", "Lützen", "Weißenfels"]),
            &wgs84_config(),
        )
        .await
        .unwrap();

        assert_eq!(plan.legs.len(), 2);
        assert!(plan.failures.is_empty());

        // Aggregate distance is the sum of both legs.
        assert_eq!(plan.statistics.total_distance_meters, 35_700.0);
        assert_eq!(plan.statistics.total_duration_minutes, 155.0);

        // The day-1 partition covers only the first leg.
        let day1 = plan.day_statistics(1);
        assert_eq!(day1.total_distance_meters, 21_500.0);
        assert_eq!(day1.resolved_legs, 1);
    }

    #[tokio::test]
    async fn unresolvable_stop_is_dropped_and_relinked() {
        // The middle stop cannot be geocoded, so a single leg connects the
        // outer stops directly.
        let router =
            MockRouter::new().with_route(point(LEIPZIG), point(NAUMBURG), 52_000.0, 230.0);

        let plan = plan(
            &geocoder(),
            &router,
            &names(&["Leipzig", "NoSuchPlaceXYZ123", "Naumburg"]),
            &wgs84_config(),
        )
        .await
        .unwrap();

        assert_eq!(plan.stops.len(), 2);
        assert_eq!(plan.legs.len(), 1);
        assert_eq!(plan.legs[0].origin().name, "Leipzig");
        assert_eq!(plan.legs[0].destination().name, "Naumburg");
    }

    #[tokio::test]
    async fn unrouted_leg_is_a_gap_not_a_zero() {
        let router = MockRouter::new()
            .with_route(point(LEIPZIG), point(LUETZEN), 21_500.0, 95.0)
            .with_no_route(point(LUETZEN), point(WEISSENFELS));

        let plan = plan(
            &geocoder(),
            &router,
            &names(&["Leipzig", "Lützen", "Weißenfels"]),
            &wgs84_config(),
        )
        .await
        .unwrap();

        assert_eq!(plan.legs.len(), 2);
        assert_eq!(plan.failures.len(), 1);
        assert_eq!(plan.statistics.total_distance_meters, 21_500.0);
        assert_eq!(plan.statistics.unresolved_legs, 1);
        assert!(!plan.statistics.is_complete());
    }

    #[tokio::test]
    async fn fewer_than_two_resolved_stops_is_fatal() {
        let result = plan(
            &geocoder(),
            &MockRouter::new(),
            &names(&["Leipzig", "NoSuchPlaceXYZ123"]),
            &wgs84_config(),
        )
        .await;

        assert!(matches!(
            result,
            Err(PlanError::InsufficientStops { resolved: 1 })
        ));
    }

    #[tokio::test]
    async fn geocoder_outage_reports_geocoding_stage() {
        let result = plan(
            &MockGeocoder::offline(),
            &MockRouter::new(),
            &names(&["Leipzig", "Naumburg"]),
            &wgs84_config(),
        )
        .await;

        match result {
            Err(PlanError::Geocoding(_)) => {}
            other => panic!("expected geocoding stage error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn router_outage_reports_routing_stage() {
        let result = plan(
            &geocoder(),
            &MockRouter::offline(),
            &names(&["Leipzig", "Naumburg"]),
            &wgs84_config(),
        )
        .await;

        match result {
            Err(PlanError::Routing(_)) => {}
            other => panic!("expected routing stage error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn day_statistics_out_of_range_is_empty() {
        let router = MockRouter::new().with_route(point(LEIPZIG), point(LUETZEN), 21_500.0, 95.0);

        let plan = plan(
            &geocoder(),
            &router,
            &names(&["Leipzig", "Lützen"]),
            &wgs84_config(),
        )
        .await
        .unwrap();

        let day9 = plan.day_statistics(9);
        assert_eq!(day9.total_distance_meters, 0.0);
        assert_eq!(day9.resolved_legs, 0);
    }
}
