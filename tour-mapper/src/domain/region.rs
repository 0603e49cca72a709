//! Administrative boundary records.

use geo::MultiPolygon;

use super::DomainError;

/// One administrative boundary from the boundary dataset.
///
/// Loaded once from the dataset and immutable thereafter; filtering derives
/// a new collection rather than mutating this one.
#[derive(Debug, Clone, PartialEq)]
pub struct RegionRecord {
    /// Stable identifier of the record within its dataset.
    pub id: String,

    /// Region code used for filtering (e.g. a district key).
    pub code: String,

    /// Boundary polygons.
    pub boundary: MultiPolygon<f64>,
}

impl RegionRecord {
    /// Construct a record, validating that the code and boundary are non-empty.
    pub fn new(
        id: impl Into<String>,
        code: impl Into<String>,
        boundary: MultiPolygon<f64>,
    ) -> Result<Self, DomainError> {
        let id = id.into();
        let code = code.into();

        if code.trim().is_empty() {
            return Err(DomainError::EmptyRegionCode(id));
        }
        if boundary.0.is_empty() {
            return Err(DomainError::EmptyBoundary(id));
        }

        Ok(Self { id, code, boundary })
    }
}
