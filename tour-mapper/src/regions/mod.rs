//! Administrative boundary loading and filtering.
//!
//! Boundaries arrive as a GeoJSON FeatureCollection with a caller-configured
//! property holding each feature's region code. The schema is validated at
//! load time; filtering by accepted codes and reprojection are pure,
//! order-preserving transforms.

mod error;
mod filter;
mod loader;

pub use error::RegionError;
pub use filter::filter_regions;
pub use loader::load_regions;
