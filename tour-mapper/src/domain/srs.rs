//! Spatial reference handling.
//!
//! The geocoding and routing services deliver WGS84 longitude/latitude.
//! Region filtering and map composition happen in a caller-chosen target
//! reference; this module parses reference identifiers and projects points
//! and geometries into them.

use std::fmt;

use geo::{LineString, MultiPolygon, Point, Polygon};

use super::DomainError;

/// UTM is defined between 80°S and 84°N.
const UTM_MIN_LAT: f64 = -80.0;
const UTM_MAX_LAT: f64 = 84.0;

/// Error returned when parsing an invalid spatial reference identifier.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid spatial reference: {reason}")]
pub struct InvalidSrs {
    reason: String,
}

impl InvalidSrs {
    fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

/// A target spatial reference system.
///
/// # Examples
///
/// ```
/// use tour_mapper::domain::Srs;
///
/// assert_eq!(Srs::parse("EPSG:4326").unwrap(), Srs::Wgs84);
/// assert_eq!(Srs::parse("EPSG:32633").unwrap(), Srs::Utm { zone: 33 });
/// assert_eq!(Srs::default(), Srs::Utm { zone: 33 });
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Srs {
    /// WGS84 longitude/latitude (EPSG:4326).
    Wgs84,
    /// Universal Transverse Mercator, northern-hemisphere zone (EPSG:326xx).
    Utm { zone: u8 },
}

impl Default for Srs {
    fn default() -> Self {
        // UTM zone 33N (EPSG:32633), covering the Saale/Elster region
        Srs::Utm { zone: 33 }
    }
}

impl Srs {
    /// Parse a spatial reference identifier.
    ///
    /// Accepts `EPSG:4326`, `EPSG:326NN` (UTM north zone NN) and the
    /// shorthand `utm:NN`.
    pub fn parse(s: &str) -> Result<Self, InvalidSrs> {
        let normalized = s.trim().to_ascii_uppercase();

        if normalized == "EPSG:4326" {
            return Ok(Srs::Wgs84);
        }

        let zone_str = if let Some(code) = normalized.strip_prefix("EPSG:326") {
            code
        } else if let Some(code) = normalized.strip_prefix("UTM:") {
            code
        } else {
            return Err(InvalidSrs::new(format!(
                "unrecognized identifier '{s}' (expected EPSG:4326, EPSG:326NN or utm:NN)"
            )));
        };

        let zone: u8 = zone_str
            .parse()
            .map_err(|_| InvalidSrs::new(format!("'{zone_str}' is not a UTM zone number")))?;
        if !(1..=60).contains(&zone) {
            return Err(InvalidSrs::new(format!(
                "UTM zone {zone} out of range (1-60)"
            )));
        }

        Ok(Srs::Utm { zone })
    }

    /// Project a WGS84 point into this reference.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the coordinate is outside the valid range of the
    /// reference (longitude/latitude bounds for WGS84, the 80°S-84°N band
    /// for UTM).
    pub fn project_point(&self, point: Point<f64>) -> Result<Point<f64>, DomainError> {
        let (lon, lat) = (point.x(), point.y());
        let out_of_range = || DomainError::ProjectionOutOfRange {
            lon,
            lat,
            srs: self.to_string(),
        };

        if !(-180.0..=180.0).contains(&lon) || !(-90.0..=90.0).contains(&lat) {
            return Err(out_of_range());
        }

        match self {
            Srs::Wgs84 => Ok(point),
            Srs::Utm { zone } => {
                if !(UTM_MIN_LAT..=UTM_MAX_LAT).contains(&lat) {
                    return Err(out_of_range());
                }
                let (northing, easting, _convergence) = utm::to_utm_wgs84(lat, lon, *zone);
                Ok(Point::new(easting, northing))
            }
        }
    }

    /// Project a WGS84 line string into this reference.
    pub fn project_line(&self, line: &LineString<f64>) -> Result<LineString<f64>, DomainError> {
        let coords = line
            .points()
            .map(|p| self.project_point(p).map(|p| (p.x(), p.y())))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(LineString::from(coords))
    }

    /// Project a WGS84 multi-polygon into this reference.
    pub fn project_multi_polygon(
        &self,
        boundary: &MultiPolygon<f64>,
    ) -> Result<MultiPolygon<f64>, DomainError> {
        let polygons = boundary
            .iter()
            .map(|polygon| {
                let exterior = self.project_line(polygon.exterior())?;
                let interiors = polygon
                    .interiors()
                    .iter()
                    .map(|ring| self.project_line(ring))
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(Polygon::new(exterior, interiors))
            })
            .collect::<Result<Vec<_>, DomainError>>()?;
        Ok(MultiPolygon(polygons))
    }
}

impl fmt::Display for Srs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Srs::Wgs84 => write!(f, "EPSG:4326"),
            Srs::Utm { zone } => write!(f, "EPSG:326{zone:02}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_wgs84() {
        assert_eq!(Srs::parse("EPSG:4326").unwrap(), Srs::Wgs84);
        assert_eq!(Srs::parse("epsg:4326").unwrap(), Srs::Wgs84);
    }

    #[test]
    fn parse_utm_identifiers() {
        assert_eq!(Srs::parse("EPSG:32633").unwrap(), Srs::Utm { zone: 33 });
        assert_eq!(Srs::parse("utm:32").unwrap(), Srs::Utm { zone: 32 });
    }

    #[test]
    fn parse_rejects_garbage() {
        assert!(Srs::parse("EPSG:3857").is_err());
        assert!(Srs::parse("utm:0").is_err());
        assert!(Srs::parse("utm:61").is_err());
        assert!(Srs::parse("not-a-reference").is_err());
    }

    #[test]
    fn display_round_trips() {
        assert_eq!(Srs::Wgs84.to_string(), "EPSG:4326");
        assert_eq!(Srs::Utm { zone: 33 }.to_string(), "EPSG:32633");
        assert_eq!(Srs::parse(&Srs::default().to_string()).unwrap(), Srs::default());
    }

    #[test]
    fn wgs84_projection_is_identity() {
        let point = Point::new(12.37, 51.34);
        assert_eq!(Srs::Wgs84.project_point(point).unwrap(), point);
    }

    #[test]
    fn utm_projection_lands_in_plausible_range() {
        // Leipzig, UTM zone 33N: easting west of the 15°E central meridian,
        // northing a bit over 5,600 km from the equator.
        let projected = Srs::Utm { zone: 33 }
            .project_point(Point::new(12.37, 51.34))
            .unwrap();

        assert!((250_000.0..500_000.0).contains(&projected.x()), "easting {}", projected.x());
        assert!((5_600_000.0..5_800_000.0).contains(&projected.y()), "northing {}", projected.y());
    }

    #[test]
    fn utm_rejects_polar_latitudes() {
        let result = Srs::Utm { zone: 33 }.project_point(Point::new(12.0, 88.0));
        assert!(matches!(result, Err(DomainError::ProjectionOutOfRange { .. })));
    }

    #[test]
    fn wgs84_rejects_out_of_range_coordinates() {
        assert!(Srs::Wgs84.project_point(Point::new(181.0, 10.0)).is_err());
        assert!(Srs::Wgs84.project_point(Point::new(10.0, 91.0)).is_err());
    }

    #[test]
    fn project_line_preserves_point_count() {
        let line = LineString::from(vec![(12.0, 51.0), (12.1, 51.1), (12.2, 51.2)]);
        let projected = Srs::Utm { zone: 33 }.project_line(&line).unwrap();
        assert_eq!(projected.0.len(), 3);
    }

    #[test]
    fn project_multi_polygon_preserves_structure() {
        let polygon = Polygon::new(
            LineString::from(vec![(12.0, 51.0), (12.5, 51.0), (12.5, 51.5), (12.0, 51.0)]),
            vec![],
        );
        let projected = Srs::Utm { zone: 33 }
            .project_multi_polygon(&MultiPolygon(vec![polygon]))
            .unwrap();
        assert_eq!(projected.0.len(), 1);
        assert_eq!(projected.0[0].exterior().0.len(), 4);
    }
}
