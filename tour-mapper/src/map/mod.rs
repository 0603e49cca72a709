//! Map scene composition and rendering.
//!
//! Composition is pure logic: region polygons with visited flags, routed
//! leg paths, labelled stop markers and a bounding extent. Turning a scene
//! into raster bytes is delegated to a [`MapRenderer`] implementation; the
//! bundled one drives an HTTP static-map service.

mod compose;
mod error;
mod mapbox;
mod scene;

use std::future::Future;

pub use compose::compose_scene;
pub use error::RenderError;
pub use mapbox::{MapboxConfig, MapboxStatic};
pub use scene::{MapScene, MapStyle, Marker, RegionShape};

/// Trait for turning a composed scene into a raster image.
///
/// This abstraction keeps the rendering service pluggable and lets tests
/// run without network access.
pub trait MapRenderer {
    /// Render the scene, returning encoded raster bytes.
    fn render(
        &self,
        scene: &MapScene,
        style: &MapStyle,
    ) -> impl Future<Output = Result<Vec<u8>, RenderError>> + Send;
}
