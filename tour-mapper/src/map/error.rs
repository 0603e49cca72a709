//! Map rendering error types.

use crate::domain::DomainError;

/// Errors from scene composition and rendering.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    /// The scene has no routes or markers to draw
    #[error("nothing to draw: the scene has no routes or markers")]
    EmptyScene,

    /// The renderer cannot handle the scene's spatial reference
    #[error("scene coordinates are in {srs}; the static map service requires EPSG:4326")]
    UnsupportedSrs { srs: String },

    /// A geometry could not be projected into the scene reference
    #[error("projection failed: {0}")]
    Projection(#[from] DomainError),

    /// Network failure or timeout reaching the map service
    #[error("static map service unavailable: {message}")]
    ServiceUnavailable { message: String },

    /// Map service returned an error status
    #[error("static map API error {status}: {message}")]
    Api { status: u16, message: String },
}

impl From<reqwest::Error> for RenderError {
    fn from(err: reqwest::Error) -> Self {
        RenderError::ServiceUnavailable {
            message: err.to_string(),
        }
    }
}
