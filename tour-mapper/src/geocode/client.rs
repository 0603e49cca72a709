//! Geocoding HTTP client.
//!
//! Talks to a Nominatim-style search API. Each lookup issues at most one
//! request; concurrent lookups are bounded by a semaphore to stay within the
//! service's usage policy.

use std::sync::Arc;

use geo::Point;
use serde::Deserialize;
use tokio::sync::Semaphore;

use super::error::GeocodeError;

/// Default base URL for the geocoding service.
const DEFAULT_BASE_URL: &str = "https://nominatim.openstreetmap.org";

/// Default maximum concurrent requests.
const DEFAULT_MAX_CONCURRENT: usize = 5;

/// Default user agent, required by the public service's usage policy.
const DEFAULT_USER_AGENT: &str = "tour-mapper/0.1";

/// One place in a search response.
///
/// The service encodes coordinates as strings.
#[derive(Debug, Clone, Deserialize)]
pub struct PlaceDto {
    pub lat: String,
    pub lon: String,
    #[serde(default)]
    pub display_name: String,
}

/// Configuration for the geocoding client.
#[derive(Debug, Clone)]
pub struct GeocoderConfig {
    /// Base URL for the search API
    pub base_url: String,
    /// User agent sent with every request
    pub user_agent: String,
    /// Maximum concurrent requests
    pub max_concurrent: usize,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for GeocoderConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            max_concurrent: DEFAULT_MAX_CONCURRENT,
            timeout_secs: 30,
        }
    }
}

impl GeocoderConfig {
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

/// Geocoding API client.
///
/// Uses a semaphore to limit concurrent requests and avoid rate limiting.
#[derive(Debug, Clone)]
pub struct GeocodeClient {
    http: reqwest::Client,
    base_url: String,
    semaphore: Arc<Semaphore>,
}

impl GeocodeClient {
    /// Create a new geocoding client with the given configuration.
    pub fn new(config: GeocoderConfig) -> Result<Self, GeocodeError> {
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

    /// Look up a place name.
    ///
    /// Returns the WGS84 longitude/latitude of the best match, or `None`
    /// when the service has no match for the name. Exactly one request is
    /// issued; ambiguous names resolve to the service's top result.
    pub async fn lookup(&self, name: &str) -> Result<Option<Point<f64>>, GeocodeError> {
        let _permit =
            self.semaphore
                .acquire()
                .await
                .map_err(|_| GeocodeError::ServiceUnavailable {
                    message: "request limiter closed".to_string(),
                })?;

        let url = format!("{}/search", self.base_url.trim_end_matches('/'));

        let response = self
            .http
            .get(&url)
            .query(&[("q", name), ("format", "json"), ("limit", "1")])
            .send()
            .await?;

        let status = response.status();

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(GeocodeError::RateLimited);
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(GeocodeError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let body = response.text().await?;

        let places: Vec<PlaceDto> =
            serde_json::from_str(&body).map_err(|e| GeocodeError::Json {
                message: e.to_string(),
            })?;

        match places.first() {
            Some(place) => Ok(Some(parse_place(place)?)),
            None => Ok(None),
        }
    }
}

impl crate::trip::Geocoder for GeocodeClient {
    async fn lookup(&self, name: &str) -> Result<Option<Point<f64>>, GeocodeError> {
        GeocodeClient::lookup(self, name).await
    }
}

fn parse_place(place: &PlaceDto) -> Result<Point<f64>, GeocodeError> {
    let lat: f64 = place.lat.parse().map_err(|_| GeocodeError::Json {
        message: format!("unparseable latitude '{}'", place.lat),
    })?;
    let lon: f64 = place.lon.parse().map_err(|_| GeocodeError::Json {
        message: format!("unparseable longitude '{}'", place.lon),
    })?;
    Ok(Point::new(lon, lat))
}
