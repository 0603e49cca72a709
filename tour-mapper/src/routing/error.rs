//! Routing client error types.

/// Errors that can occur when interacting with the routing service.
///
/// These are all transport- or service-level faults and abort the run. A
/// per-leg "no route between these points" outcome is *not* an error: it is
/// reported as `None` by the client and excluded from aggregates by the
/// caller.
#[derive(Debug, thiserror::Error)]
pub enum RoutingError {
    /// Network failure or timeout reaching the service
    #[error("routing service unavailable: {message}")]
    ServiceUnavailable { message: String },

    /// API returned an error status
    #[error("routing API error {status}: {message}")]
    Api { status: u16, message: String },

    /// Rate limited by the service
    #[error("rate limited by the routing service")]
    RateLimited,

    /// Service rejected the request (e.g. malformed query)
    #[error("routing service error {code}: {message}")]
    Service { code: String, message: String },

    /// Failed to parse response JSON
    #[error("routing JSON parse error: {message}")]
    Json { message: String },

    /// Response parsed but carried unusable values
    #[error("routing response invalid: {message}")]
    Invalid { message: String },
}

impl From<reqwest::Error> for RoutingError {
    fn from(err: reqwest::Error) -> Self {
        RoutingError::ServiceUnavailable {
            message: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = RoutingError::Service {
            code: "InvalidQuery".into(),
            message: "Query string malformed".into(),
        };
        assert_eq!(
            err.to_string(),
            "routing service error InvalidQuery: Query string malformed"
        );

        let err = RoutingError::ServiceUnavailable {
            message: "connection refused".into(),
        };
        assert!(err.to_string().contains("routing service unavailable"));
    }
}
