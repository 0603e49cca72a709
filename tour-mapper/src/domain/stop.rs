//! Trip stops.

use geo::Point;

/// A resolved stop location, kept in both coordinate references.
///
/// The geocoding and routing services speak WGS84 longitude/latitude, while
/// filtering and map composition happen in the trip's target reference, so a
/// resolved stop carries both. The two fields always describe the same place.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StopLocation {
    /// WGS84 longitude/latitude, as returned by the geocoder.
    pub wgs84: Point<f64>,

    /// The same location projected into the trip's target reference.
    pub projected: Point<f64>,
}

/// A named waypoint in the trip, optionally geocoded.
///
/// `sequence_index` is the stop's position in the trip. Indices are dense:
/// after unresolved stops are dropped, survivors are renumbered from zero so
/// that adjacent stops always differ by exactly one (see [`reindex`]).
#[derive(Debug, Clone, PartialEq)]
pub struct Stop {
    /// Position in the trip (0-based, dense).
    pub sequence_index: usize,

    /// The place name as supplied by the caller.
    pub name: String,

    /// Geocoded location, `None` until resolved.
    pub location: Option<StopLocation>,
}

impl Stop {
    /// Create an ungeocoded stop.
    pub fn new(sequence_index: usize, name: impl Into<String>) -> Self {
        Self {
            sequence_index,
            name: name.into(),
            location: None,
        }
    }

    /// Create a geocoded stop.
    pub fn geocoded(
        sequence_index: usize,
        name: impl Into<String>,
        location: StopLocation,
    ) -> Self {
        Self {
            sequence_index,
            name: name.into(),
            location: Some(location),
        }
    }

    /// Returns true if the stop has a resolved location.
    pub fn is_resolved(&self) -> bool {
        self.location.is_some()
    }
}

/// Renumber stops densely from zero, preserving order.
///
/// Dropping unresolved stops leaves gaps in the sequence numbering. Legs
/// require adjacent stops to differ by exactly one, so the survivors are
/// renumbered before leg construction.
pub fn reindex(stops: Vec<Stop>) -> Vec<Stop> {
    stops
        .into_iter()
        .enumerate()
        .map(|(index, mut stop)| {
            stop.sequence_index = index;
            stop
        })
        .collect()
}
