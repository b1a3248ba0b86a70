//! Core seam between route selection and whatever produces routes.
//!
//! The HTTP client in [`crate::directions`] is the production implementation;
//! tests and offline tools can supply their own.

use crate::error::DirectionsError;
use crate::route::{Origin, RouteOption};

/// Default number of alternatives requested per fetch.
pub const DEFAULT_MAX_ROUTES: usize = 3;

/// A single request for alternative routes.
#[derive(Debug, Clone, PartialEq)]
pub struct DirectionsRequest {
    pub origin: Origin,
    pub destination: String,
    /// Upper bound on returned options, applied to the upstream list.
    pub max_routes: usize,
}

impl DirectionsRequest {
    pub fn new(origin: impl Into<Origin>, destination: impl Into<String>) -> Self {
        Self {
            origin: origin.into(),
            destination: destination.into(),
            max_routes: DEFAULT_MAX_ROUTES,
        }
    }

    pub fn with_max_routes(mut self, max_routes: usize) -> Self {
        self.max_routes = max_routes;
        self
    }

    /// Checks that do not need the network.
    pub fn validate(&self) -> Result<(), DirectionsError> {
        if self.destination.trim().is_empty() {
            return Err(DirectionsError::DestinationRequired);
        }
        if self.max_routes == 0 {
            return Err(DirectionsError::InvalidMaxRoutes);
        }
        Ok(())
    }
}

/// Provides alternative routes between two places.
///
/// Implementations return at most `request.max_routes` options in upstream
/// order, none with an empty geometry. An empty list is a valid answer.
pub trait DirectionsProvider {
    fn route_alternatives(
        &self,
        request: &DirectionsRequest,
    ) -> Result<Vec<RouteOption>, DirectionsError>;
}
