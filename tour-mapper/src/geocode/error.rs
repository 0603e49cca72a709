//! Geocoding client error types.

/// Errors that can occur when interacting with the geocoding service.
///
/// All variants are fatal for the run: without the geocoder the trip cannot
/// be assembled. A name with no match is *not* an error (see
/// [`GeocodeClient::lookup`](super::GeocodeClient::lookup)).
#[derive(Debug, thiserror::Error)]
pub enum GeocodeError {
    /// Network failure or timeout reaching the service
    #[error("geocoding service unavailable: {message}")]
    ServiceUnavailable { message: String },

    /// API returned an error status
    #[error("geocoding API error {status}: {message}")]
    Api { status: u16, message: String },

    /// Rate limited by the service
    #[error("rate limited by the geocoding service")]
    RateLimited,

    /// Failed to parse response JSON
    #[error("geocoding JSON parse error: {message}")]
    Json { message: String },

    /// A resolved coordinate could not be projected into the target reference
    #[error("projection failed for '{name}': {source}")]
    Projection {
        name: String,
        #[source]
        source: crate::domain::DomainError,
    },
}

impl From<reqwest::Error> for GeocodeError {
    fn from(err: reqwest::Error) -> Self {
        GeocodeError::ServiceUnavailable {
            message: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = GeocodeError::Api {
            status: 500,
            message: "Internal Server Error".into(),
        };
        assert_eq!(err.to_string(), "geocoding API error 500: Internal Server Error");

        let err = GeocodeError::RateLimited;
        assert_eq!(err.to_string(), "rate limited by the geocoding service");
    }
}
