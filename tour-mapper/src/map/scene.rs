//! Map scene types.

use geo::{LineString, MultiPolygon, Point, Rect};

use crate::domain::Srs;

/// Style configuration for rendered maps.
///
/// Passed explicitly to the renderer; there is no process-wide theme state.
#[derive(Debug, Clone)]
pub struct MapStyle {
    /// Output image width in pixels.
    pub width: u32,

    /// Output image height in pixels.
    pub height: u32,

    /// Base tile style identifier, in the form the map service expects
    /// (e.g. `"mapbox/outdoors-v12"`).
    pub tile_style: String,

    /// Stroke colour for routed leg paths.
    pub route_color: String,

    /// Stroke width for routed leg paths, in pixels.
    pub route_width: f64,

    /// Marker colour for stops.
    pub marker_color: String,
}

impl Default for MapStyle {
    fn default() -> Self {
        Self {
            width: 1280,
            height: 960,
            tile_style: "mapbox/outdoors-v12".to_string(),
            route_color: "#e5544e".to_string(),
            route_width: 3.0,
            marker_color: "#3b6bd6".to_string(),
        }
    }
}

/// A labelled point on the map.
#[derive(Debug, Clone, PartialEq)]
pub struct Marker {
    /// Position in the scene's spatial reference.
    pub position: Point<f64>,

    /// Label text.
    pub label: String,
}

impl Marker {
    /// Create a marker.
    pub fn new(position: Point<f64>, label: impl Into<String>) -> Self {
        Self {
            position,
            label: label.into(),
        }
    }
}

/// One region polygon with its visited flag.
#[derive(Debug, Clone, PartialEq)]
pub struct RegionShape {
    /// Identifier of the underlying boundary record.
    pub id: String,

    /// Boundary in the scene's spatial reference.
    pub boundary: MultiPolygon<f64>,

    /// Whether any stop of the trip lies inside the boundary.
    pub visited: bool,
}

/// Everything a renderer needs to draw one map.
///
/// All geometry is in `srs`; renderers that only speak one reference check
/// the field and refuse mismatched scenes.
#[derive(Debug, Clone)]
pub struct MapScene {
    /// Spatial reference of all scene geometry.
    pub srs: Srs,

    /// Drawing extent, padded around the content.
    pub extent: Rect<f64>,

    /// Region polygons, in dataset order.
    pub regions: Vec<RegionShape>,

    /// Routed leg paths, in leg order.
    pub routes: Vec<LineString<f64>>,

    /// Stop markers, in trip order.
    pub markers: Vec<Marker>,

    /// Distance/duration labels, one per routed leg, at the path midpoint.
    pub leg_labels: Vec<Marker>,

    /// Scene title (e.g. `"Day 2"`), if any.
    pub title: Option<String>,
}
