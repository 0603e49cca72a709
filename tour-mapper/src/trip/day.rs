//! Day partitioning.

use crate::domain::Leg;

/// Select the legs belonging to one day of the trip.
///
/// `day` is 1-based. Day `d` spans the two consecutive stop positions
/// `d - 1` and `d` (dense, post-drop indices); a leg belongs to the day when
/// both of its endpoints fall inside that window. With dense indices this
/// selects the single leg ridden on that day.
///
/// An out-of-range day yields an empty selection rather than an error: days
/// are sparse and user-specified.
pub fn select_day(legs: &[Leg], day: usize) -> Vec<Leg> {
    if day == 0 {
        return Vec::new();
    }

    let first = day - 1;
    let last = day;

    legs.iter()
        .filter(|leg| {
            leg.origin().sequence_index >= first && leg.destination().sequence_index <= last
        })
        .cloned()
        .collect()
}

/// Number of days in the trip: one per leg.
pub fn day_count(legs: &[Leg]) -> usize {
    legs.len()
}
