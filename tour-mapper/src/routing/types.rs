//! OSRM API response types for the Route service.
//!
//! Deserialization types for the OSRM Route API response format, requested
//! with `overview=full&geometries=geojson` so the path arrives as GeoJSON
//! coordinate pairs.

use serde::Deserialize;

/// OSRM Route API response.
///
/// Contains routes on success or an error message on failure; `code`
/// indicates the response status.
#[derive(Debug, Deserialize)]
pub struct RouteResponse {
    /// Status code from the service.
    ///
    /// Common values:
    /// - `"Ok"` - request was successful
    /// - `"NoRoute"` - no route exists between the points
    /// - `"InvalidQuery"` - invalid query parameters
    pub code: String,

    /// Optional error message when `code` is not `"Ok"`.
    pub message: Option<String>,

    /// Candidate routes, best first.
    #[serde(default)]
    pub routes: Vec<RouteDto>,
}

impl RouteResponse {
    /// Check if the response indicates success.
    pub fn is_ok(&self) -> bool {
        self.code == "Ok"
    }

    /// Check if the response reports that no route exists between the
    /// points. This is a per-leg condition, not a service fault.
    pub fn is_no_route(&self) -> bool {
        self.code == "NoRoute" || self.code == "NoSegment"
    }
}

/// One route in a response.
#[derive(Debug, Deserialize)]
pub struct RouteDto {
    /// Route length in metres.
    pub distance: f64,

    /// Travel time in seconds.
    pub duration: f64,

    /// Route geometry as GeoJSON.
    pub geometry: RouteGeometryDto,
}

/// GeoJSON LineString geometry of a route.
#[derive(Debug, Deserialize)]
pub struct RouteGeometryDto {
    /// `(longitude, latitude)` pairs along the route.
    pub coordinates: Vec<[f64; 2]>,
}
