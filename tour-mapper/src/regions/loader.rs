//! Boundary dataset loading.

use std::path::Path;

use geojson::GeoJson;

use crate::domain::RegionRecord;

use super::error::RegionError;

/// Load boundary records from a GeoJSON FeatureCollection file.
///
/// `code_property` names the feature property holding the region code; the
/// dataset schema is validated here so a misconfigured property name fails
/// fast instead of surfacing as a missing attribute later.
///
/// # Errors
///
/// Returns `SourceUnavailable` if the file cannot be read or parsed,
/// `SchemaMismatch` if any feature lacks a string-valued `code_property`,
/// and `InvalidGeometry` if a feature's geometry is missing or is not a
/// polygon.
pub fn load_regions(path: &Path, code_property: &str) -> Result<Vec<RegionRecord>, RegionError> {
    let display_path = path.display().to_string();

    let source_unavailable = |message: String| RegionError::SourceUnavailable {
        path: display_path.clone(),
        message,
    };

    let raw = std::fs::read_to_string(path).map_err(|e| source_unavailable(e.to_string()))?;

    let geojson: GeoJson = raw
        .parse()
        .map_err(|e: geojson::Error| source_unavailable(e.to_string()))?;

    let collection = match geojson {
        GeoJson::FeatureCollection(collection) => collection,
        other => {
            return Err(source_unavailable(format!(
                "expected a FeatureCollection, found {}",
                geojson_kind(&other)
            )));
        }
    };

    let mut records = Vec::with_capacity(collection.features.len());

    for (index, feature) in collection.features.iter().enumerate() {
        let id = feature_id(feature, index);

        let code = feature
            .properties
            .as_ref()
            .and_then(|properties| properties.get(code_property))
            .and_then(|value| value.as_str())
            .ok_or_else(|| RegionError::SchemaMismatch {
                path: display_path.clone(),
                id: id.clone(),
                property: code_property.to_string(),
            })?;

        let boundary = feature_boundary(feature, &id)?;

        let record = RegionRecord::new(id.clone(), code, boundary).map_err(|e| {
            RegionError::InvalidGeometry {
                id,
                message: e.to_string(),
            }
        })?;
        records.push(record);
    }

    Ok(records)
}

fn geojson_kind(geojson: &GeoJson) -> &'static str {
    match geojson {
        GeoJson::Geometry(_) => "a bare Geometry",
        GeoJson::Feature(_) => "a single Feature",
        GeoJson::FeatureCollection(_) => "a FeatureCollection",
    }
}

fn feature_id(feature: &geojson::Feature, index: usize) -> String {
    match &feature.id {
        Some(geojson::feature::Id::String(id)) => id.clone(),
        Some(geojson::feature::Id::Number(id)) => id.to_string(),
        None => format!("region-{index}"),
    }
}

fn feature_boundary(
    feature: &geojson::Feature,
    id: &str,
) -> Result<geo::MultiPolygon<f64>, RegionError> {
    let invalid = |message: String| RegionError::InvalidGeometry {
        id: id.to_string(),
        message,
    };

    let geometry = feature
        .geometry
        .as_ref()
        .ok_or_else(|| invalid("feature has no geometry".to_string()))?;

    let converted = geo::Geometry::<f64>::try_from(geometry.value.clone())
        .map_err(|e| invalid(e.to_string()))?;

    match converted {
        geo::Geometry::Polygon(polygon) => Ok(geo::MultiPolygon(vec![polygon])),
        geo::Geometry::MultiPolygon(multi) => Ok(multi),
        _ => Err(invalid("expected a Polygon or MultiPolygon".to_string())),
    }
}
