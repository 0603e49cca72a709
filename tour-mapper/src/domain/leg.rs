//! Trip leg type.
//!
//! A `Leg` represents a single trip segment between two consecutive stops.
//! Endpoint locations are validated at construction so `origin_location()`
//! and `destination_location()` never fail.

use geo::LineString;

use super::{DomainError, Stop, StopLocation};

/// A routed path between two stops, as returned by the routing service.
///
/// `path` is a WGS84 longitude/latitude line string; distance and duration
/// are already converted to metres and minutes at the client boundary.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteSummary {
    /// The routed path geometry.
    pub path: LineString<f64>,

    /// Route length in metres.
    pub distance_meters: f64,

    /// Travel time in minutes.
    pub duration_minutes: f64,
}

/// A leg of the trip (one routed segment between consecutive stops).
///
/// # Invariants
///
/// - Both endpoints are geocoded
/// - `origin.sequence_index + 1 == destination.sequence_index` (stop indices
///   are dense, so a leg never silently skips a dropped stop)
#[derive(Debug, Clone, PartialEq)]
pub struct Leg {
    origin: Stop,
    destination: Stop,
    // Cached validated locations (guaranteed present - validated at construction)
    origin_location: StopLocation,
    destination_location: StopLocation,
    route: Option<RouteSummary>,
}

impl Leg {
    /// Construct a leg, validating that both endpoints are geocoded and
    /// adjacent in the stop sequence.
    ///
    /// # Errors
    ///
    /// Returns `Err` if either stop has no location, or if the destination
    /// does not immediately follow the origin.
    pub fn between(origin: Stop, destination: Stop) -> Result<Self, DomainError> {
        let origin_location = origin.location.ok_or(DomainError::UngeocodedStop {
            index: origin.sequence_index,
            name: origin.name.clone(),
        })?;
        let destination_location =
            destination.location.ok_or(DomainError::UngeocodedStop {
                index: destination.sequence_index,
                name: destination.name.clone(),
            })?;

        if destination.sequence_index != origin.sequence_index + 1 {
            return Err(DomainError::NonConsecutiveStops {
                origin: origin.sequence_index,
                destination: destination.sequence_index,
            });
        }

        Ok(Leg {
            origin,
            destination,
            origin_location,
            destination_location,
            route: None,
        })
    }

    /// Returns the origin stop.
    pub fn origin(&self) -> &Stop {
        &self.origin
    }

    /// Returns the destination stop.
    pub fn destination(&self) -> &Stop {
        &self.destination
    }

    /// Returns the origin location (guaranteed present).
    pub fn origin_location(&self) -> StopLocation {
        self.origin_location
    }

    /// Returns the destination location (guaranteed present).
    pub fn destination_location(&self) -> StopLocation {
        self.destination_location
    }

    /// Returns the routed path, if the leg has been resolved.
    pub fn route(&self) -> Option<&RouteSummary> {
        self.route.as_ref()
    }

    /// Returns true if the leg carries a resolved route.
    pub fn is_resolved(&self) -> bool {
        self.route.is_some()
    }

    /// Returns the route distance in metres, if resolved.
    pub fn distance_meters(&self) -> Option<f64> {
        self.route.as_ref().map(|r| r.distance_meters)
    }

    /// Returns the route duration in minutes, if resolved.
    pub fn duration_minutes(&self) -> Option<f64> {
        self.route.as_ref().map(|r| r.duration_minutes)
    }

    /// Returns a copy of this leg with the route populated.
    pub fn with_route(mut self, route: RouteSummary) -> Self {
        self.route = Some(route);
        self
    }
}

/// Build one leg per adjacent pair of stops, in input order.
///
/// Produces exactly `max(0, stops.len() - 1)` legs. Fewer than two stops
/// yields an empty vector: an empty trip is valid data, not an error.
/// Callers that require a routable trip check the stop count themselves.
///
/// # Errors
///
/// Returns `Err` if any stop is ungeocoded or the sequence has gaps; both
/// indicate the caller skipped the drop-and-reindex step.
pub fn build_legs(stops: &[Stop]) -> Result<Vec<Leg>, DomainError> {
    stops
        .windows(2)
        .map(|pair| Leg::between(pair[0].clone(), pair[1].clone()))
        .collect()
}
