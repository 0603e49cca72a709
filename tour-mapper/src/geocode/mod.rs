//! Geocoding service client and mock.
//!
//! Resolves place names to WGS84 coordinates via a Nominatim-style search
//! API. One request per name, no retries; a name the service cannot resolve
//! is reported as `None`, not as an error.

mod client;
mod error;
mod mock;

pub use client::{GeocodeClient, GeocoderConfig, PlaceDto};
pub use error::GeocodeError;
pub use mock::MockGeocoder;
