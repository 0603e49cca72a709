//! Region filtering and reprojection.

use std::collections::HashSet;

use crate::domain::{RegionRecord, Srs};

use super::error::RegionError;

/// Filter boundary records by accepted region codes and reproject them.
///
/// An empty `accepted_codes` set means "no filtering": every record is kept.
/// Input order is preserved and the input is untouched; calling twice with
/// identical inputs yields identical output.
///
/// # Errors
///
/// Returns `InvalidGeometry` if a kept record's boundary cannot be projected
/// into `target_srs`.
pub fn filter_regions(
    regions: &[RegionRecord],
    accepted_codes: &HashSet<String>,
    target_srs: Srs,
) -> Result<Vec<RegionRecord>, RegionError> {
    regions
        .iter()
        .filter(|region| accepted_codes.is_empty() || accepted_codes.contains(&region.code))
        .map(|region| {
            let boundary = target_srs
                .project_multi_polygon(&region.boundary)
                .map_err(|e| RegionError::InvalidGeometry {
                    id: region.id.clone(),
                    message: e.to_string(),
                })?;
            Ok(RegionRecord {
                id: region.id.clone(),
                code: region.code.clone(),
                boundary,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo::{LineString, MultiPolygon, Polygon};

    fn record(id: &str, code: &str, lon: f64) -> RegionRecord {
        RegionRecord::new(
            id,
            code,
            MultiPolygon(vec![Polygon::new(
                LineString::from(vec![
                    (lon, 51.0),
                    (lon + 0.4, 51.0),
                    (lon + 0.4, 51.4),
                    (lon, 51.0),
                ]),
                vec![],
            )]),
        )
        .unwrap()
    }

    fn codes(values: &[&str]) -> HashSet<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn keeps_only_accepted_codes() {
        let regions = vec![
            record("a", "14713", 12.2),
            record("b", "15084", 11.7),
            record("c", "14729", 12.6),
        ];

        let filtered = filter_regions(&regions, &codes(&["14713", "14729"]), Srs::Wgs84).unwrap();

        assert_eq!(filtered.len(), 2);
        assert!(filtered.iter().all(|r| ["14713", "14729"].contains(&r.code.as_str())));
    }

    #[test]
    fn empty_code_set_keeps_everything() {
        let regions = vec![record("a", "14713", 12.2), record("b", "15084", 11.7)];

        let filtered = filter_regions(&regions, &HashSet::new(), Srs::Wgs84).unwrap();

        assert_eq!(filtered.len(), regions.len());
    }

    #[test]
    fn preserves_input_order() {
        let regions = vec![
            record("c", "3", 12.6),
            record("a", "1", 12.2),
            record("b", "2", 11.7),
        ];

        let filtered = filter_regions(&regions, &HashSet::new(), Srs::Wgs84).unwrap();

        let ids: Vec<&str> = filtered.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["c", "a", "b"]);
    }

    #[test]
    fn is_idempotent_over_identical_inputs() {
        let regions = vec![record("a", "14713", 12.2), record("b", "15084", 11.7)];
        let accepted = codes(&["14713"]);

        let first = filter_regions(&regions, &accepted, Srs::Utm { zone: 33 }).unwrap();
        let second = filter_regions(&regions, &accepted, Srs::Utm { zone: 33 }).unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn reprojects_boundaries() {
        let regions = vec![record("a", "14713", 12.2)];

        let filtered = filter_regions(&regions, &HashSet::new(), Srs::Utm { zone: 33 }).unwrap();

        // UTM eastings/northings are in metres, far outside degree ranges.
        let exterior = filtered[0].boundary.0[0].exterior();
        assert!(exterior.0.iter().all(|c| c.x > 180.0 && c.y > 90.0));
    }

    #[test]
    fn unprojectable_boundary_is_invalid_geometry() {
        // Latitude 89 is outside the UTM band.
        let bad = RegionRecord::new(
            "polar",
            "00000",
            MultiPolygon(vec![Polygon::new(
                LineString::from(vec![(12.0, 89.0), (12.4, 89.0), (12.4, 89.4), (12.0, 89.0)]),
                vec![],
            )]),
        )
        .unwrap();

        let result = filter_regions(&[bad], &HashSet::new(), Srs::Utm { zone: 33 });
        assert!(matches!(result, Err(RegionError::InvalidGeometry { id, .. }) if id == "polar"));
    }

    #[test]
    fn no_matches_yields_empty_output() {
        let regions = vec![record("a", "14713", 12.2)];
        let filtered = filter_regions(&regions, &codes(&["99999"]), Srs::Wgs84).unwrap();
        assert!(filtered.is_empty());
    }
}
