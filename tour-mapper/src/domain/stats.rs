//! Trip statistics and label formatting.
//!
//! Distances and durations come from the routing service per leg; this
//! module sums them over a selection of legs and formats the totals for
//! map labels and the run summary.

use chrono::Duration;

use super::Leg;

/// Durations are rounded to this bucket before formatting.
const DURATION_BUCKET_MINUTES: f64 = 15.0;

/// Aggregated distance and duration over a selection of legs.
///
/// Legs without a resolved route are excluded from the sums and counted in
/// `unresolved_legs` instead; a missing distance is never treated as zero.
#[derive(Debug, Clone, PartialEq)]
pub struct TripStatistics {
    /// Sum of resolved leg distances, in metres.
    pub total_distance_meters: f64,

    /// Sum of resolved leg durations, in minutes.
    pub total_duration_minutes: f64,

    /// Number of legs with a resolved route.
    pub resolved_legs: usize,

    /// Number of legs excluded from the sums because routing failed.
    pub unresolved_legs: usize,
}

impl TripStatistics {
    /// Returns true if every leg contributed to the sums.
    pub fn is_complete(&self) -> bool {
        self.unresolved_legs == 0
    }

    /// Total distance formatted for display.
    pub fn formatted_distance(&self) -> String {
        format_distance(self.total_distance_meters)
    }

    /// Total duration formatted for display.
    pub fn formatted_duration(&self) -> String {
        format_duration(self.total_duration_minutes)
    }
}

/// Sum distance and duration over the legs that carry a resolved route.
pub fn aggregate(legs: &[Leg]) -> TripStatistics {
    let mut stats = TripStatistics {
        total_distance_meters: 0.0,
        total_duration_minutes: 0.0,
        resolved_legs: 0,
        unresolved_legs: 0,
    };

    for leg in legs {
        match leg.route() {
            Some(route) => {
                stats.total_distance_meters += route.distance_meters;
                stats.total_duration_minutes += route.duration_minutes;
                stats.resolved_legs += 1;
            }
            None => stats.unresolved_legs += 1,
        }
    }

    stats
}

/// Format a duration in minutes as a human-readable label.
///
/// The value is rounded to the nearest 15-minute bucket first. Zero and
/// negative inputs format as `"0 minutes"`; anything of an hour or more as
/// `"H hour(s) M minutes"`, with multi-day durations folded into the hour
/// count.
///
/// # Examples
///
/// ```
/// use tour_mapper::domain::format_duration;
///
/// assert_eq!(format_duration(0.0), "0 minutes");
/// assert_eq!(format_duration(61.0), "1 hour 0 minutes");
/// assert_eq!(format_duration(1500.0), "25 hours 0 minutes");
/// ```
pub fn format_duration(minutes: f64) -> String {
    if minutes <= 0.0 || !minutes.is_finite() {
        return "0 minutes".to_string();
    }

    let buckets = (minutes / DURATION_BUCKET_MINUTES).round() as i64;
    let total = Duration::minutes(buckets * DURATION_BUCKET_MINUTES as i64);

    let hours = total.num_hours();
    let remainder = (total - Duration::hours(hours)).num_minutes();

    match hours {
        0 => format!("{remainder} minutes"),
        1 => format!("1 hour {remainder} minutes"),
        _ => format!("{hours} hours {remainder} minutes"),
    }
}

/// Format a distance in metres, rounded to the nearest metre and
/// thousands-separated.
///
/// # Examples
///
/// ```
/// use tour_mapper::domain::format_distance;
///
/// assert_eq!(format_distance(1234.4), "1,234 m");
/// assert_eq!(format_distance(999.0), "999 m");
/// ```
pub fn format_distance(meters: f64) -> String {
    if meters <= 0.0 || !meters.is_finite() {
        return "0 m".to_string();
    }

    format!("{} m", thousands(meters.round() as u64))
}

fn thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}


#[cfg(test)]
mod proptests {
    use super::*;
    use crate::domain::{Leg, RouteSummary, Stop, StopLocation};
    use geo::{LineString, Point};
    use proptest::prelude::*;

    fn legs_from(distances: &[Option<f64>]) -> Vec<Leg> {
        distances
            .iter()
            .enumerate()
            .map(|(i, distance)| {
                let origin = Stop::geocoded(
                    i,
                    format!("Stop {}", i),
                    StopLocation {
                        wgs84: Point::new(12.0, 51.0),
                        projected: Point::new(12.0, 51.0),
                    },
                );
                let destination = Stop::geocoded(
                    i + 1,
                    format!("Stop {}", i + 1),
                    StopLocation {
                        wgs84: Point::new(12.1, 51.0),
                        projected: Point::new(12.1, 51.0),
                    },
                );
                let leg = Leg::between(origin, destination).unwrap();
                match distance {
                    Some(d) => leg.with_route(RouteSummary {
                        path: LineString::from(vec![(12.0, 51.0), (12.1, 51.0)]),
                        distance_meters: *d,
                        duration_minutes: d / 250.0,
                    }),
                    None => leg,
                }
            })
            .collect()
    }

    proptest! {
        /// Property: the aggregate equals the manual sum over resolved legs,
        /// and unresolved legs are counted exactly.
        #[test]
        fn aggregate_matches_manual_sum(
            distances in proptest::collection::vec(
                proptest::option::of(0.0f64..100_000.0),
                0..20,
            )
        ) {
            let legs = legs_from(&distances);
            let stats = aggregate(&legs);

            let expected: f64 = distances.iter().flatten().sum();
            let unresolved = distances.iter().filter(|d| d.is_none()).count();

            prop_assert!((stats.total_distance_meters - expected).abs() < 1e-6);
            prop_assert_eq!(stats.unresolved_legs, unresolved);
            prop_assert_eq!(stats.resolved_legs, distances.len() - unresolved);
        }

        /// Property: formatted durations always mention minutes and never days.
        #[test]
        fn duration_format_shape(minutes in -100.0f64..10_000.0) {
            let formatted = format_duration(minutes);
            prop_assert!(formatted.ends_with("minutes"));
            prop_assert!(!formatted.contains("day"));
        }
    }
}
