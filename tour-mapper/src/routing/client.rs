//! Routing HTTP client.
//!
//! Talks to an OSRM-style route API. The public instance exposes one named
//! endpoint per travel profile (`routed-bike`, `routed-foot`); both are
//! handled by the same client.

use std::sync::Arc;

use geo::{LineString, Point};
use tokio::sync::Semaphore;

use crate::domain::{Profile, RouteSummary};
use crate::trip::RouteProvider;

use super::error::RoutingError;
use super::types::RouteResponse;

/// Default base URL for the routing service.
const DEFAULT_BASE_URL: &str = "https://routing.openstreetmap.de";

/// Default maximum concurrent requests.
const DEFAULT_MAX_CONCURRENT: usize = 5;

/// Default user agent.
const DEFAULT_USER_AGENT: &str = "tour-mapper/0.1";

/// Configuration for the routing client.
#[derive(Debug, Clone)]
pub struct RoutingConfig {
    /// Base URL of the routing service
    pub base_url: String,
    /// User agent sent with every request
    pub user_agent: String,
    /// Maximum concurrent requests
    pub max_concurrent: usize,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for RoutingConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            max_concurrent: DEFAULT_MAX_CONCURRENT,
            timeout_secs: 30,
        }
    }
}

impl RoutingConfig {
    /// Create a config with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a custom base URL (for testing or a self-hosted instance).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set maximum concurrent requests.
    pub fn with_max_concurrent(mut self, n: usize) -> Self {
        self.max_concurrent = n;
        self
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

/// Routing API client.
///
/// Uses a semaphore to limit concurrent requests; route requests for the
/// legs of a trip are independent and may be issued in parallel.
#[derive(Debug, Clone)]
pub struct RoutingClient {
    http: reqwest::Client,
    base_url: String,
    semaphore: Arc<Semaphore>,
}

impl RoutingClient {
    /// Create a new routing client with the given configuration.
    pub fn new(config: RoutingConfig) -> Result<Self, RoutingError> {
        let http = reqwest::Client::builder()
            .user_agent(&config.user_agent)
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url,
            semaphore: Arc::new(Semaphore::new(config.max_concurrent)),
        })
    }

    /// Build the route request URL for a pair of WGS84 points.
    fn route_url(&self, profile: Profile, origin: Point<f64>, destination: Point<f64>) -> String {
        format!(
            "{}/{}/route/v1/{}/{},{};{},{}",
            self.base_url.trim_end_matches('/'),
            profile.endpoint(),
            profile.route_profile(),
            origin.x(),
            origin.y(),
            destination.x(),
            destination.y(),
        )
    }

    /// Request a route between two WGS84 points.
    ///
    /// Returns `None` when the service reports that no route exists between
    /// the points; the caller records this as a per-leg gap.
    pub async fn route(
        &self,
        profile: Profile,
        origin: Point<f64>,
        destination: Point<f64>,
    ) -> Result<Option<RouteSummary>, RoutingError> {
        let _permit =
            self.semaphore
                .acquire()
                .await
                .map_err(|_| RoutingError::ServiceUnavailable {
                    message: "request limiter closed".to_string(),
                })?;

        let url = self.route_url(profile, origin, destination);

        let response = self
            .http
            .get(&url)
            .query(&[("overview", "full"), ("geometries", "geojson")])
            .send()
            .await?;

        let status = response.status();

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(RoutingError::RateLimited);
        }

        // OSRM reports "NoRoute" with a 400 on some deployments; parse the
        // body before deciding how to treat non-success statuses.
        let body = response.text().await?;

        let parsed: Result<RouteResponse, _> = serde_json::from_str(&body);

        let route_response = match parsed {
            Ok(r) => r,
            Err(e) if status.is_success() => {
                return Err(RoutingError::Json {
                    message: e.to_string(),
                });
            }
            Err(_) => {
                return Err(RoutingError::Api {
                    status: status.as_u16(),
                    message: body,
                });
            }
        };

        if route_response.is_no_route() {
            return Ok(None);
        }

        if !route_response.is_ok() {
            return Err(RoutingError::Service {
                code: route_response.code,
                message: route_response.message.unwrap_or_default(),
            });
        }

        match route_response.routes.into_iter().next() {
            Some(route) => Ok(Some(convert_route(route)?)),
            None => Ok(None),
        }
    }
}

/// Convert a route DTO into the domain summary.
///
/// Distances and durations must be finite and non-negative; duration is
/// converted from seconds to minutes here so nothing downstream sees
/// service units.
fn convert_route(route: super::types::RouteDto) -> Result<RouteSummary, RoutingError> {
    if !route.distance.is_finite() || route.distance < 0.0 {
        return Err(RoutingError::Invalid {
            message: format!("distance {} out of range", route.distance),
        });
    }
    if !route.duration.is_finite() || route.duration < 0.0 {
        return Err(RoutingError::Invalid {
            message: format!("duration {} out of range", route.duration),
        });
    }
    if route.geometry.coordinates.len() < 2 {
        return Err(RoutingError::Invalid {
            message: "route geometry has fewer than 2 points".to_string(),
        });
    }

    let path = LineString::from(
        route
            .geometry
            .coordinates
            .iter()
            .map(|pair| (pair[0], pair[1]))
            .collect::<Vec<_>>(),
    );

    Ok(RouteSummary {
        path,
        distance_meters: route.distance,
        duration_minutes: route.duration / 60.0,
    })
}

impl RouteProvider for RoutingClient {
    async fn route(
        &self,
        profile: Profile,
        origin: Point<f64>,
        destination: Point<f64>,
    ) -> Result<Option<RouteSummary>, RoutingError> {
        RoutingClient::route(self, profile, origin, destination).await
    }
}
