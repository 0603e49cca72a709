//! Stop geocoding orchestration.

use futures::future;
use tracing::{debug, warn};

use crate::domain::{Srs, Stop, StopLocation, reindex};
use crate::geocode::GeocodeError;

use super::Geocoder;

/// Geocode an ordered list of stop names.
///
/// One lookup is issued per name; duplicate names are looked up
/// independently because a trip may intentionally revisit a place. Lookups
/// run concurrently (the client bounds how many are in flight) and results
/// are reassembled in input order before any downstream step sees them.
///
/// Names the service cannot resolve are dropped from the output and the
/// survivors are renumbered densely, so legs built from the result re-link
/// around the gap. This is documented behaviour, not an error.
///
/// # Errors
///
/// Returns `Err` if the service itself fails (network fault, API error) or
/// a resolved coordinate cannot be projected into `target_srs`.
pub async fn geocode_stops<G: Geocoder>(
    geocoder: &G,
    names: &[String],
    target_srs: Srs,
) -> Result<Vec<Stop>, GeocodeError> {
    let lookups = names.iter().map(|name| geocoder.lookup(name));

    // join_all preserves input order regardless of completion order.
    let results = future::join_all(lookups).await;

    let mut stops = Vec::with_capacity(names.len());
    for (index, (name, result)) in names.iter().zip(results).enumerate() {
        match result? {
            Some(wgs84) => {
                let projected =
                    target_srs
                        .project_point(wgs84)
                        .map_err(|source| GeocodeError::Projection {
                            name: name.clone(),
                            source,
                        })?;
                stops.push(Stop::geocoded(index, name, StopLocation { wgs84, projected }));
            }
            None => {
                warn!(name = %name, "no geocoding result; dropping stop");
            }
        }
    }

    debug!(
        requested = names.len(),
        resolved = stops.len(),
        "geocoding complete"
    );

    Ok(reindex(stops))
}
