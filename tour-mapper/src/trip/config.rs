//! Trip configuration.

use std::collections::HashSet;
use std::path::PathBuf;

use crate::domain::{Profile, Srs};

/// Default name of the region-code property in boundary datasets.
const DEFAULT_REGION_CODE_PROPERTY: &str = "code";

/// Configuration parameters for assembling a trip.
#[derive(Debug, Clone)]
pub struct TripConfig {
    /// Boundary dataset to draw region polygons from, if any.
    pub boundary_path: Option<PathBuf>,

    /// Feature property holding the region code in the boundary dataset.
    pub region_code_property: String,

    /// Region codes to keep. Empty means "all regions".
    pub accepted_codes: HashSet<String>,

    /// Target spatial reference for stored stop points and region polygons.
    pub target_srs: Srs,

    /// Travel profile used for every leg.
    pub profile: Profile,

    /// Whether to write a GPX track file alongside the maps.
    pub emit_track: bool,
}

impl Default for TripConfig {
    fn default() -> Self {
        Self {
            boundary_path: None,
            region_code_property: DEFAULT_REGION_CODE_PROPERTY.to_string(),
            accepted_codes: HashSet::new(),
            target_srs: Srs::default(),
            profile: Profile::Bike,
            emit_track: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = TripConfig::default();

        assert!(config.boundary_path.is_none());
        assert_eq!(config.region_code_property, "code");
        assert!(config.accepted_codes.is_empty());
        assert_eq!(config.target_srs, Srs::Utm { zone: 33 });
        assert_eq!(config.profile, Profile::Bike);
        assert!(!config.emit_track);
    }
}
