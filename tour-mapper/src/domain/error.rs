//! Domain error types.
//!
//! These errors represent validation failures and data inconsistencies
//! in the domain layer. They are distinct from API/IO errors.

/// Domain-level errors for validation and data consistency.
#[derive(Debug, Clone, thiserror::Error)]
pub enum DomainError {
    /// A leg endpoint has no geocoded location
    #[error("stop {index} ({name}) has no geocoded location")]
    UngeocodedStop { index: usize, name: String },

    /// Leg endpoints are not adjacent in the stop sequence
    #[error("stops {origin} and {destination} are not consecutive")]
    NonConsecutiveStops { origin: usize, destination: usize },

    /// Coordinate cannot be projected into the target reference
    #[error("coordinate ({lon}, {lat}) is outside the valid range for {srs}")]
    ProjectionOutOfRange { lon: f64, lat: f64, srs: String },

    /// Region record with an empty region code
    #[error("region {0} has an empty region code")]
    EmptyRegionCode(String),

    /// Region record with no boundary polygons
    #[error("region {0} has an empty boundary")]
    EmptyBoundary(String),
}
