//! Static map rendering via the Mapbox Static Images API.
//!
//! Encodes the scene's routes and markers as a GeoJSON overlay in the
//! request path and fetches the rendered raster. Region polygons are not
//! included in the overlay: the API's URL length limit is far too small for
//! district boundaries, so the base tile style carries the background.

use geo::{Coord, LineString};
use serde_json::json;

use crate::domain::Srs;

use super::MapRenderer;
use super::error::RenderError;
use super::scene::{MapScene, MapStyle};

/// Default base URL for the static map service.
const DEFAULT_BASE_URL: &str = "https://api.mapbox.com";

/// Maximum path points per route in the overlay, to stay inside the
/// service's URL length limit.
const MAX_OVERLAY_POINTS: usize = 50;

/// Configuration for the static map client.
#[derive(Debug, Clone)]
pub struct MapboxConfig {
    /// API access token
    pub access_token: String,
    /// Base URL for the API
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl MapboxConfig {
    /// Create a new config with the given access token.
    pub fn new(access_token: impl Into<String>) -> Self {
        Self {
            access_token: access_token.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: 60,
        }
    }

    /// Set a custom base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }
}

/// Static map renderer backed by the Mapbox Static Images API.
#[derive(Debug, Clone)]
pub struct MapboxStatic {
    http: reqwest::Client,
    base_url: String,
    access_token: String,
}

impl MapboxStatic {
    /// Create a new static map renderer.
    pub fn new(config: MapboxConfig) -> Result<Self, RenderError> {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url,
            access_token: config.access_token,
        })
    }

    /// Encode the scene's routes and markers as a GeoJSON overlay with
    /// simplestyle properties.
    fn overlay(scene: &MapScene, style: &MapStyle) -> String {
        let mut features = Vec::new();

        for route in &scene.routes {
            let thinned = thin_line(route, MAX_OVERLAY_POINTS);
            let geometry = geojson::Geometry::new(geojson::Value::from(&thinned));
            features.push(geojson::Feature {
                bbox: None,
                geometry: Some(geometry),
                id: None,
                properties: json!({
                    "stroke": style.route_color,
                    "stroke-width": style.route_width,
                })
                .as_object()
                .cloned(),
                foreign_members: None,
            });
        }

        for marker in &scene.markers {
            let geometry = geojson::Geometry::new(geojson::Value::from(&marker.position));
            features.push(geojson::Feature {
                bbox: None,
                geometry: Some(geometry),
                id: None,
                properties: json!({
                    "marker-color": style.marker_color,
                    "marker-size": "small",
                    "title": marker.label,
                })
                .as_object()
                .cloned(),
                foreign_members: None,
            });
        }

        geojson::GeoJson::FeatureCollection(geojson::FeatureCollection {
            bbox: None,
            features,
            foreign_members: None,
        })
        .to_string()
    }

    /// Build the static image request URL for the scene.
    fn static_url(&self, scene: &MapScene, style: &MapStyle) -> String {
        let overlay = Self::overlay(scene, style);
        let encoded: String = url::form_urlencoded::byte_serialize(overlay.as_bytes()).collect();

        let extent = scene.extent;
        format!(
            "{}/styles/v1/{}/static/geojson({})/[{},{},{},{}]/{}x{}?access_token={}",
            self.base_url.trim_end_matches('/'),
            style.tile_style,
            encoded,
            extent.min().x,
            extent.min().y,
            extent.max().x,
            extent.max().y,
            style.width,
            style.height,
            self.access_token,
        )
    }
}

impl MapRenderer for MapboxStatic {
    async fn render(&self, scene: &MapScene, style: &MapStyle) -> Result<Vec<u8>, RenderError> {
        if scene.srs != Srs::Wgs84 {
            return Err(RenderError::UnsupportedSrs {
                srs: scene.srs.to_string(),
            });
        }

        let url = self.static_url(scene, style);

        let response = self.http.get(&url).send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(RenderError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        Ok(response.bytes().await?.to_vec())
    }
}

/// Reduce a line to at most `max_points` coordinates, keeping the endpoints.
fn thin_line(line: &LineString<f64>, max_points: usize) -> LineString<f64> {
    let coords = &line.0;
    if coords.len() <= max_points || max_points < 2 {
        return line.clone();
    }

    let last = coords.len() - 1;
    let step = last as f64 / (max_points - 1) as f64;
    let thinned: Vec<Coord<f64>> = (0..max_points)
        .map(|i| coords[((i as f64 * step).round() as usize).min(last)])
        .collect();

    LineString::from(thinned)
}
