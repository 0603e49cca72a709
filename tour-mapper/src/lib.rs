//! Multi-day bicycle and walking tour mapper.
//!
//! Turns an ordered list of place names into geocoded stops, routed legs
//! with aggregated statistics, composed map scenes and an optional GPX
//! track. Geocoding, routing and map rendering are external services.

pub mod domain;
pub mod geocode;
pub mod map;
pub mod regions;
pub mod routing;
pub mod track;
pub mod trip;
