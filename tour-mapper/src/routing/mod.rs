//! Routing service client and mock.
//!
//! Requests bicycle/foot routes between consecutive stops from an
//! OSRM-style route API. Each travel profile is served by its own named
//! endpoint. Transport-level failures are fatal; a "no route" outcome for a
//! single pair of points is recoverable and surfaces as `None`.

mod client;
mod error;
mod mock;
mod types;

pub use client::{RoutingClient, RoutingConfig};
pub use error::RoutingError;
pub use mock::MockRouter;
pub use types::{RouteDto, RouteGeometryDto, RouteResponse};
