//! Error types for fetching and selecting routes.

use thiserror::Error;

/// Errors from the directions fetcher.
///
/// The first three variants are local validation failures raised before any
/// request is sent.
#[derive(Error, Debug)]
pub enum DirectionsError {
    #[error("missing directions API key")]
    MissingApiKey,

    #[error("destination is required")]
    DestinationRequired,

    #[error("max_routes must be at least 1")]
    InvalidMaxRoutes,

    /// Non-2xx response. `message` is the payload's `error_message` if it had one.
    #[error("{message}")]
    Http { status: u16, message: String },

    /// The service answered but its `status` field was not `OK`.
    #[error("{message}")]
    Status { status: String, message: String },

    #[error("directions request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("failed to parse directions response: {0}")]
    Decode(#[from] serde_json::Error),
}

impl DirectionsError {
    /// True for errors raised before touching the network.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            DirectionsError::MissingApiKey
                | DirectionsError::DestinationRequired
                | DirectionsError::InvalidMaxRoutes
        )
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SelectionError {
    #[error("route index {index} out of range ({len} routes)")]
    OutOfRange { index: usize, len: usize },
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid value for {key}: {value:?}")]
    InvalidValue { key: &'static str, value: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = DirectionsError::DestinationRequired;
        assert_eq!(err.to_string(), "destination is required");

        let err = DirectionsError::Http {
            status: 403,
            message: "The provided API key is invalid.".into(),
        };
        assert_eq!(err.to_string(), "The provided API key is invalid.");

        let err = SelectionError::OutOfRange { index: 4, len: 2 };
        assert_eq!(err.to_string(), "route index 4 out of range (2 routes)");
    }

    #[test]
    fn validation_class() {
        assert!(DirectionsError::MissingApiKey.is_validation());
        assert!(DirectionsError::InvalidMaxRoutes.is_validation());
        assert!(
            !DirectionsError::Status {
                status: "ZERO_RESULTS".into(),
                message: "Directions error: ZERO_RESULTS".into(),
            }
            .is_validation()
        );
    }
}
