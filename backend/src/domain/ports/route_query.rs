//! Driving port for campus route lookups.
//!
//! Inbound adapters call [`RouteQuery`] with location ids and receive fully
//! populated location and connection sequences, ready to draw.

use async_trait::async_trait;

use crate::domain::{Connection, ConnectionId, Location, LocationId, RouteError};

/// Origin and destination of a route request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RouteRequest {
    /// Where the route starts.
    pub origin_id: LocationId,
    /// Where the route ends.
    pub destination_id: LocationId,
}

impl RouteRequest {
    /// Build a request from raw location ids.
    #[must_use]
    pub const fn new(origin_id: i32, destination_id: i32) -> Self {
        Self {
            origin_id: LocationId::new(origin_id),
            destination_id: LocationId::new(destination_id),
        }
    }
}

/// A route the caller already computed and wants cached.
#[derive(Debug, Clone, PartialEq)]
pub struct SaveRouteRequest {
    /// Where the route starts.
    pub origin_id: LocationId,
    /// Where the route ends.
    pub destination_id: LocationId,
    /// Claimed path length in metres.
    pub total_distance: f64,
    /// Connections from origin to destination, in order.
    pub connection_ids: Vec<ConnectionId>,
}

/// A route ready for display.
///
/// `connections.len() == locations.len() - 1` and consecutive locations are
/// joined by the connection between them.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteView {
    /// Locations from start to end.
    pub locations: Vec<Location>,
    /// Connections traversed.
    pub connections: Vec<Connection>,
    /// Path length in metres.
    pub total_distance: f64,
    /// Whether the route was served from the route cache.
    pub cached: bool,
}

/// Outcome of an explicit save.
#[derive(Debug, Clone, PartialEq)]
pub struct SavedRouteView {
    /// The route held by the cache after the save.
    pub route: RouteView,
    /// `false` when an entry already existed and was returned instead.
    pub created: bool,
}

/// Driving port for route lookups and explicit saves.
#[async_trait]
pub trait RouteQuery: Send + Sync {
    /// Serve the route from the cache, or compute it and cache it in the
    /// background.
    ///
    /// # Errors
    ///
    /// - [`RouteError::InvalidRequest`] for identical endpoints or connector
    ///   endpoints.
    /// - [`RouteError::NotFoundEndpoint`] when an endpoint does not exist.
    /// - [`RouteError::NoPathExists`] when nothing joins the endpoints.
    /// - [`RouteError::DataLoad`] when the campus graph cannot be read.
    async fn get_route(&self, request: RouteRequest) -> Result<RouteView, RouteError>;

    /// Serve the route from the cache only.
    ///
    /// # Errors
    ///
    /// As [`RouteQuery::get_route`] for validation, plus
    /// [`RouteError::NotCached`] on a miss and [`RouteError::Persistence`]
    /// when the cache cannot be read.
    async fn find_cached(&self, request: RouteRequest) -> Result<RouteView, RouteError>;

    /// Compute the route without reading or writing the cache.
    ///
    /// # Errors
    ///
    /// As [`RouteQuery::get_route`].
    async fn calculate(&self, request: RouteRequest) -> Result<RouteView, RouteError>;

    /// Validate a caller-supplied route and store it unless the pair is
    /// already cached.
    ///
    /// # Errors
    ///
    /// - [`RouteError::InvalidRequest`] when the connections do not chain
    ///   from origin to destination or the distance is invalid.
    /// - [`RouteError::Persistence`] when the cache write fails.
    async fn save_route(&self, request: SaveRouteRequest) -> Result<SavedRouteView, RouteError>;
}

/// Fixture query for adapters that need a port but no campus.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureRouteQuery;

#[async_trait]
impl RouteQuery for FixtureRouteQuery {
    async fn get_route(&self, request: RouteRequest) -> Result<RouteView, RouteError> {
        Err(RouteError::NoPathExists {
            origin: request.origin_id,
            destination: request.destination_id,
        })
    }

    async fn find_cached(&self, request: RouteRequest) -> Result<RouteView, RouteError> {
        Err(RouteError::NotCached {
            origin: request.origin_id,
            destination: request.destination_id,
        })
    }

    async fn calculate(&self, request: RouteRequest) -> Result<RouteView, RouteError> {
        self.get_route(request).await
    }

    async fn save_route(&self, request: SaveRouteRequest) -> Result<SavedRouteView, RouteError> {
        Err(RouteError::NoPathExists {
            origin: request.origin_id,
            destination: request.destination_id,
        })
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[tokio::test]
    async fn fixture_reports_no_path() {
        let err = FixtureRouteQuery
            .get_route(RouteRequest::new(1, 2))
            .await
            .expect_err("fixture has no campus");
        assert!(matches!(err, RouteError::NoPathExists { .. }));
    }
}
