//! Failures of the route service and their transport-agnostic mapping.

use serde_json::json;
use thiserror::Error;

use super::{Error, LocationId};

/// Which side of a route request an error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    /// The requested start.
    Origin,
    /// The requested end.
    Destination,
}

impl Endpoint {
    /// Lower-case label used in messages and error details.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Origin => "origin",
            Self::Destination => "destination",
        }
    }
}

impl std::fmt::Display for Endpoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors returned by [`crate::domain::ports::RouteQuery`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RouteError {
    /// The request failed validation.
    #[error("{message}")]
    InvalidRequest {
        /// Explanation shown to the caller.
        message: String,
        /// Endpoint at fault, when the failure concerns one side.
        endpoint: Option<Endpoint>,
    },
    /// An endpoint does not exist.
    #[error("{endpoint} location {id} not found")]
    NotFoundEndpoint {
        /// Missing side.
        endpoint: Endpoint,
        /// Requested id.
        id: LocationId,
    },
    /// Both endpoints exist but no connection path joins them.
    #[error("no path exists between {origin} and {destination}")]
    NoPathExists {
        /// Requested origin.
        origin: LocationId,
        /// Requested destination.
        destination: LocationId,
    },
    /// No cached route joins the pair.
    #[error("no cached route between {origin} and {destination}")]
    NotCached {
        /// Requested origin.
        origin: LocationId,
        /// Requested destination.
        destination: LocationId,
    },
    /// The route cache failed.
    #[error("route cache failure: {message}")]
    Persistence {
        /// Adapter message.
        message: String,
    },
    /// The campus graph could not be loaded.
    #[error("campus graph unavailable: {message}")]
    DataLoad {
        /// Adapter message.
        message: String,
    },
}

impl RouteError {
    /// Validation failure not tied to either endpoint.
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::InvalidRequest {
            message: message.into(),
            endpoint: None,
        }
    }

    /// Validation failure naming the endpoint at fault.
    pub fn invalid_endpoint(endpoint: Endpoint, message: impl Into<String>) -> Self {
        Self::InvalidRequest {
            message: message.into(),
            endpoint: Some(endpoint),
        }
    }

    /// Cache failure.
    pub fn persistence(message: impl Into<String>) -> Self {
        Self::Persistence {
            message: message.into(),
        }
    }

    /// Graph provider failure.
    pub fn data_load(message: impl Into<String>) -> Self {
        Self::DataLoad {
            message: message.into(),
        }
    }
}

impl From<RouteError> for Error {
    fn from(value: RouteError) -> Self {
        let message = value.to_string();
        match value {
            RouteError::InvalidRequest { endpoint, .. } => {
                let err = Error::invalid_request(message);
                match endpoint {
                    Some(endpoint) => err.with_details(json!({ "endpoint": endpoint.as_str() })),
                    None => err,
                }
            }
            RouteError::NotFoundEndpoint { endpoint, id } => Error::not_found(message)
                .with_details(json!({ "endpoint": endpoint.as_str(), "id": id.get() })),
            RouteError::NoPathExists { .. } | RouteError::NotCached { .. } => {
                Error::not_found(message)
            }
            RouteError::Persistence { .. } => Error::service_unavailable(message),
            RouteError::DataLoad { .. } => Error::internal(message),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode;
    use rstest::rstest;

    #[rstest]
    #[case(RouteError::invalid_request("same"), ErrorCode::InvalidRequest)]
    #[case(
        RouteError::NotFoundEndpoint { endpoint: Endpoint::Origin, id: LocationId::new(4) },
        ErrorCode::NotFound
    )]
    #[case(
        RouteError::NoPathExists { origin: LocationId::new(1), destination: LocationId::new(2) },
        ErrorCode::NotFound
    )]
    #[case(
        RouteError::NotCached { origin: LocationId::new(1), destination: LocationId::new(2) },
        ErrorCode::NotFound
    )]
    #[case(RouteError::persistence("down"), ErrorCode::ServiceUnavailable)]
    #[case(RouteError::data_load("down"), ErrorCode::InternalError)]
    fn maps_to_error_code(#[case] err: RouteError, #[case] expected: ErrorCode) {
        assert_eq!(Error::from(err).code(), expected);
    }

    #[rstest]
    fn invalid_endpoint_names_the_side() {
        let err: Error =
            RouteError::invalid_endpoint(Endpoint::Destination, "connector nodes cannot be endpoints")
                .into();
        assert_eq!(
            err.details().and_then(|d| d.get("endpoint")),
            Some(&json!("destination"))
        );
    }

    #[rstest]
    fn not_found_endpoint_message_names_the_side() {
        let err = RouteError::NotFoundEndpoint {
            endpoint: Endpoint::Destination,
            id: LocationId::new(12),
        };
        assert_eq!(err.to_string(), "destination location 12 not found");
    }
}
