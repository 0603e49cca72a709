//! Trip assembly orchestration.
//!
//! Turns an ordered list of stop names into geocoded stops, routed legs and
//! aggregated statistics. The external services are abstracted behind the
//! [`Geocoder`] and [`RouteProvider`] traits so the pipeline can be tested
//! with mock data.

mod config;
mod day;
mod geocode;
mod plan;
mod resolve;

use std::future::Future;

use geo::Point;

use crate::domain::{Profile, RouteSummary};
use crate::geocode::GeocodeError;
use crate::routing::RoutingError;

pub use config::TripConfig;
pub use day::{day_count, select_day};
pub use geocode::geocode_stops;
pub use plan::{PlanError, TripPlan, plan};
pub use resolve::{LegFailure, ResolvedTrip, resolve_legs};

/// Trait for resolving place names to WGS84 coordinates.
///
/// This abstraction allows the pipeline to be tested with mock data.
pub trait Geocoder {
    /// Look up a place name.
    ///
    /// Returns the WGS84 longitude/latitude of the best match, or `None`
    /// when the service has no match.
    fn lookup(
        &self,
        name: &str,
    ) -> impl Future<Output = Result<Option<Point<f64>>, GeocodeError>> + Send;
}

/// Trait for requesting routes between WGS84 points.
///
/// This abstraction allows the pipeline to be tested with mock data.
pub trait RouteProvider {
    /// Request a route for the given travel profile.
    ///
    /// Returns `None` when the service reports that no route exists between
    /// the points.
    fn route(
        &self,
        profile: Profile,
        origin: Point<f64>,
        destination: Point<f64>,
    ) -> impl Future<Output = Result<Option<RouteSummary>, RoutingError>> + Send;
}
