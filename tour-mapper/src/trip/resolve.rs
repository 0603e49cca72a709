//! Route resolution orchestration.

use futures::future;
use tracing::{debug, warn};

use crate::domain::{Leg, Profile};
use crate::routing::RoutingError;

use super::RouteProvider;

/// A leg the routing service could not connect.
///
/// Recorded alongside the (unrouted) leg so the caller can report the gap;
/// aggregates exclude the leg rather than counting it as zero.
#[derive(Debug, Clone, PartialEq)]
pub struct LegFailure {
    /// Position of the leg in the trip.
    pub leg_index: usize,
    /// Origin stop name.
    pub origin: String,
    /// Destination stop name.
    pub destination: String,
    /// Why the leg stayed unrouted.
    pub reason: String,
}

/// Outcome of resolving a trip's legs.
///
/// `legs` is every input leg, in input order; legs in `failures` are present
/// but carry no route.
#[derive(Debug, Clone)]
pub struct ResolvedTrip {
    /// All legs, in original order.
    pub legs: Vec<Leg>,
    /// Per-leg routing gaps, in leg order.
    pub failures: Vec<LegFailure>,
}

/// Request a route for every leg.
///
/// Requests are independent and run concurrently (the client bounds how
/// many are in flight); results are reassembled in original leg order, which
/// downstream day partitioning and aggregation rely on.
///
/// A service-level fault aborts the run: the trip cannot be completed
/// without the routing service. A per-leg "no route between these points"
/// outcome is recoverable - the leg stays unrouted and is recorded in
/// [`ResolvedTrip::failures`].
pub async fn resolve_legs<R: RouteProvider>(
    router: &R,
    legs: Vec<Leg>,
    profile: Profile,
) -> Result<ResolvedTrip, RoutingError> {
    let requests = legs.iter().map(|leg| {
        let origin = leg.origin_location().wgs84;
        let destination = leg.destination_location().wgs84;
        router.route(profile, origin, destination)
    });

    // join_all preserves input order regardless of completion order.
    let results = future::join_all(requests).await;

    let mut resolved = Vec::with_capacity(legs.len());
    let mut failures = Vec::new();

    for (leg_index, (leg, result)) in legs.into_iter().zip(results).enumerate() {
        match result? {
            Some(summary) => {
                debug!(
                    leg = leg_index,
                    origin = %leg.origin().name,
                    destination = %leg.destination().name,
                    distance_meters = summary.distance_meters,
                    "leg routed"
                );
                resolved.push(leg.with_route(summary));
            }
            None => {
                warn!(
                    leg = leg_index,
                    origin = %leg.origin().name,
                    destination = %leg.destination().name,
                    "no route found; leg stays unrouted"
                );
                failures.push(LegFailure {
                    leg_index,
                    origin: leg.origin().name.clone(),
                    destination: leg.destination().name.clone(),
                    reason: "no route found between the stops".to_string(),
                });
                resolved.push(leg);
            }
        }
    }

    Ok(ResolvedTrip {
        legs: resolved,
        failures,
    })
}
