//! Map scene composition.

use std::collections::HashSet;

use geo::{Contains, Coord, LineString, Point, Rect};

use crate::domain::{Leg, RegionRecord, Srs, Stop, format_distance, format_duration};
use crate::trip::select_day;

use super::error::RenderError;
use super::scene::{MapScene, Marker, RegionShape};

/// Fraction of the extent span used as padding on each side.
const PADDING_RATIO: f64 = 0.08;

/// Minimum absolute padding, so single-point scenes still get an extent.
fn fallback_padding(srs: Srs) -> f64 {
    match srs {
        Srs::Wgs84 => 0.01,
        // Projected references are in metres.
        Srs::Utm { .. } => 1_000.0,
    }
}

/// Compose a map scene from region polygons, stops and legs.
///
/// `regions` and the stops' WGS84 locations are projected into `scene_srs`;
/// pass `day` to scope the scene (and its title) to a single day's legs, or
/// `None` for the whole trip. Regions are flagged as visited when they
/// contain at least one of the scene's stops. Each routed leg gets a
/// distance/duration label at its path midpoint.
///
/// # Errors
///
/// Returns [`RenderError::EmptyScene`] when nothing would be drawn (no
/// markers and no routes), or a projection error if geometry cannot be
/// expressed in `scene_srs`.
pub fn compose_scene(
    regions: &[RegionRecord],
    stops: &[Stop],
    legs: &[Leg],
    day: Option<usize>,
    scene_srs: Srs,
) -> Result<MapScene, RenderError> {
    let selected = match day {
        Some(day) => select_day(legs, day),
        None => legs.to_vec(),
    };

    // For a day scene only the day's own stops are drawn; the overview
    // shows every resolved stop.
    let scene_stops: Vec<&Stop> = match day {
        Some(_) => {
            let wanted: HashSet<usize> = selected
                .iter()
                .flat_map(|leg| {
                    [
                        leg.origin().sequence_index,
                        leg.destination().sequence_index,
                    ]
                })
                .collect();
            stops
                .iter()
                .filter(|stop| wanted.contains(&stop.sequence_index))
                .collect()
        }
        None => stops.iter().filter(|stop| stop.is_resolved()).collect(),
    };

    let mut markers = Vec::with_capacity(scene_stops.len());
    for stop in &scene_stops {
        if let Some(location) = stop.location {
            let position = scene_srs.project_point(location.wgs84)?;
            markers.push(Marker::new(position, stop.name.clone()));
        }
    }

    let mut routes = Vec::new();
    let mut leg_labels = Vec::new();
    for leg in &selected {
        if let Some(summary) = leg.route() {
            let path = scene_srs.project_line(&summary.path)?;
            if let Some(midpoint) = line_midpoint(&path) {
                leg_labels.push(Marker::new(
                    midpoint,
                    format!(
                        "{} / {}",
                        format_distance(summary.distance_meters),
                        format_duration(summary.duration_minutes)
                    ),
                ));
            }
            routes.push(path);
        }
    }

    let extent = scene_extent(&routes, &markers, scene_srs).ok_or(RenderError::EmptyScene)?;

    let region_shapes = regions
        .iter()
        .map(|region| {
            // Containment is checked in WGS84, where both sides started.
            let visited = scene_stops.iter().any(|stop| {
                stop.location
                    .map(|location| region.boundary.contains(&location.wgs84))
                    .unwrap_or(false)
            });
            Ok(RegionShape {
                id: region.id.clone(),
                boundary: scene_srs.project_multi_polygon(&region.boundary)?,
                visited,
            })
        })
        .collect::<Result<Vec<_>, RenderError>>()?;

    Ok(MapScene {
        srs: scene_srs,
        extent,
        regions: region_shapes,
        routes,
        markers,
        leg_labels,
        title: day.map(|day| format!("Day {day}")),
    })
}

/// The path coordinate closest to the middle, used to anchor the leg label.
fn line_midpoint(line: &LineString<f64>) -> Option<Point<f64>> {
    let coords = &line.0;
    if coords.is_empty() {
        return None;
    }
    let mid = coords[coords.len() / 2];
    Some(Point::new(mid.x, mid.y))
}

fn scene_extent(
    routes: &[LineString<f64>],
    markers: &[Marker],
    srs: Srs,
) -> Option<Rect<f64>> {
    let mut min = Coord {
        x: f64::INFINITY,
        y: f64::INFINITY,
    };
    let mut max = Coord {
        x: f64::NEG_INFINITY,
        y: f64::NEG_INFINITY,
    };
    let mut seen = false;

    let mut include = |coord: Coord<f64>| {
        min.x = min.x.min(coord.x);
        min.y = min.y.min(coord.y);
        max.x = max.x.max(coord.x);
        max.y = max.y.max(coord.y);
        seen = true;
    };

    for route in routes {
        for coord in &route.0 {
            include(*coord);
        }
    }
    for marker in markers {
        include(marker.position.0);
    }

    if !seen {
        return None;
    }

    let pad_x = ((max.x - min.x) * PADDING_RATIO).max(fallback_padding(srs));
    let pad_y = ((max.y - min.y) * PADDING_RATIO).max(fallback_padding(srs));

    Some(Rect::new(
        Coord {
            x: min.x - pad_x,
            y: min.y - pad_y,
        },
        Coord {
            x: max.x + pad_x,
            y: max.y + pad_y,
        },
    ))
}
