//! Boundary dataset error types.

/// Errors that can occur when loading or filtering boundary records.
#[derive(Debug, thiserror::Error)]
pub enum RegionError {
    /// Dataset missing, unreadable or not a FeatureCollection - fatal
    #[error("boundary dataset unavailable: {path}: {message}")]
    SourceUnavailable { path: String, message: String },

    /// The configured region-code property is absent or not a string
    #[error("boundary dataset {path}: feature {id} has no usable '{property}' property")]
    SchemaMismatch {
        path: String,
        id: String,
        property: String,
    },

    /// A record's geometry is malformed or cannot be reprojected
    #[error("invalid geometry in region {id}: {message}")]
    InvalidGeometry { id: String, message: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = RegionError::SchemaMismatch {
            path: "districts.geojson".into(),
            id: "region-3".into(),
            property: "krs_code".into(),
        };
        assert_eq!(
            err.to_string(),
            "boundary dataset districts.geojson: feature region-3 has no usable 'krs_code' property"
        );
    }
}
