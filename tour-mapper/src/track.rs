//! GPX track export.
//!
//! Writes the ordered stop points as named waypoints and the routed leg
//! paths as one track, so the trip can be loaded onto a GPS device.
//! Coordinates are written in WGS84 longitude/latitude, as GPX requires.

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use gpx::{Gpx, GpxVersion, Track, TrackSegment, Waypoint};

use crate::domain::{Leg, Stop};

/// Errors from track export.
#[derive(Debug, thiserror::Error)]
pub enum TrackError {
    /// Output file could not be created or written
    #[error("failed to write track file: {0}")]
    Io(#[from] std::io::Error),

    /// GPX serialization failed
    #[error("failed to encode GPX: {message}")]
    Encode { message: String },
}

/// Build the GPX document for a trip.
///
/// Every resolved stop becomes a named waypoint, in trip order. Routed legs
/// contribute one track segment each; unrouted legs contribute nothing, so
/// a partially routed trip still yields a loadable file.
pub fn build_gpx(stops: &[Stop], legs: &[Leg]) -> Gpx {
    let waypoints = stops
        .iter()
        .filter_map(|stop| {
            stop.location.map(|location| {
                let mut waypoint = Waypoint::new(location.wgs84);
                waypoint.name = Some(stop.name.clone());
                waypoint
            })
        })
        .collect();

    let segments: Vec<TrackSegment> = legs
        .iter()
        .filter_map(|leg| leg.route())
        .map(|route| TrackSegment {
            points: route.path.points().map(Waypoint::new).collect(),
        })
        .collect();

    let track = Track {
        name: Some("Tour".to_string()),
        segments,
        ..Track::default()
    };

    Gpx {
        version: GpxVersion::Gpx11,
        creator: Some("tour-mapper".to_string()),
        tracks: vec![track],
        waypoints,
        ..Gpx::default()
    }
}

/// Write the trip as a GPX file.
pub fn write_track(path: &Path, stops: &[Stop], legs: &[Leg]) -> Result<(), TrackError> {
    let gpx = build_gpx(stops, legs);

    let file = File::create(path)?;
    let writer = BufWriter::new(file);

    gpx::write(&gpx, writer).map_err(|e| TrackError::Encode {
        message: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{RouteSummary, StopLocation, build_legs};
    use geo::{LineString, Point};
    use std::fs::File;
    use std::io::BufReader;

    fn stop(index: usize, name: &str, lon: f64, lat: f64) -> Stop {
        let point = Point::new(lon, lat);
        Stop::geocoded(
            index,
            name,
            StopLocation {
                wgs84: point,
                projected: point,
            },
        )
    }

    fn saale_stops() -> Vec<Stop> {
        vec![
            stop(0, "Leipzig", 12.3747, 51.3406),
            stop(1, "Lützen", 12.1410, 51.2589),
            stop(2, "Weißenfels", 11.9690, 51.2016),
        ]
    }

    fn routed_legs(stops: &[Stop]) -> Vec<Leg> {
        build_legs(stops)
            .unwrap()
            .into_iter()
            .map(|leg| {
                let origin = leg.origin_location().wgs84;
                let destination = leg.destination_location().wgs84;
                leg.with_route(RouteSummary {
                    path: LineString::from(vec![
                        (origin.x(), origin.y()),
                        (destination.x(), destination.y()),
                    ]),
                    distance_meters: 20_000.0,
                    duration_minutes: 90.0,
                })
            })
            .collect()
    }

    #[test]
    fn gpx_contains_ordered_named_waypoints() {
        let stops = saale_stops();
        let gpx = build_gpx(&stops, &[]);

        let names: Vec<&str> = gpx
            .waypoints
            .iter()
            .filter_map(|w| w.name.as_deref())
            .collect();
        assert_eq!(names, vec!["Leipzig", "Lützen", "Weißenfels"]);
    }

    #[test]
    fn gpx_has_one_segment_per_routed_leg() {
        let stops = saale_stops();
        let legs = routed_legs(&stops);

        let gpx = build_gpx(&stops, &legs);

        assert_eq!(gpx.tracks.len(), 1);
        assert_eq!(gpx.tracks[0].segments.len(), 2);
    }

    #[test]
    fn unrouted_legs_contribute_no_segment() {
        let stops = saale_stops();
        let legs = build_legs(&stops).unwrap();

        let gpx = build_gpx(&stops, &legs);

        assert!(gpx.tracks[0].segments.is_empty());
        // The waypoints are still there for the device.
        assert_eq!(gpx.waypoints.len(), 3);
    }

    #[test]
    fn unresolved_stops_are_skipped() {
        let stops = vec![stop(0, "Leipzig", 12.3747, 51.3406), Stop::new(1, "Nowhere")];
        let gpx = build_gpx(&stops, &[]);
        assert_eq!(gpx.waypoints.len(), 1);
    }

    #[test]
    fn written_file_round_trips() {
        let stops = saale_stops();
        let legs = routed_legs(&stops);

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tour.gpx");

        write_track(&path, &stops, &legs).unwrap();

        let reader = BufReader::new(File::open(&path).unwrap());
        let parsed = gpx::read(reader).unwrap();

        assert_eq!(parsed.waypoints.len(), 3);
        assert_eq!(parsed.waypoints[0].name.as_deref(), Some("Leipzig"));
        assert_eq!(parsed.tracks.len(), 1);
        assert_eq!(parsed.tracks[0].segments.len(), 2);

        let first = parsed.tracks[0].segments[0].points[0].point();
        assert!((first.x() - 12.3747).abs() < 1e-6);
        assert!((first.y() - 51.3406).abs() < 1e-6);
    }
}
