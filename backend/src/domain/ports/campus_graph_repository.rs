//! Port for reading the campus graph: locations and the connections
//! between them.

use async_trait::async_trait;

use crate::domain::{Connection, ConnectionId, Location, LocationId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by campus graph providers.
    pub enum CampusGraphRepositoryError {
        /// Provider connection could not be established.
        Connection { message: String } =>
            "campus graph connection failed: {message}",
        /// Query failed or returned rows that violate the domain rules.
        Query { message: String } =>
            "campus graph query failed: {message}",
    }
}

/// Read-only access to campus locations and connections.
///
/// Lists are returned in a stable order (ascending id for the Diesel and
/// in-memory adapters); shortest-path tie-breaking follows that order.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CampusGraphRepository: Send + Sync {
    /// Look up one location.
    async fn find_location(
        &self,
        id: LocationId,
    ) -> Result<Option<Location>, CampusGraphRepositoryError>;

    /// Every location on campus.
    async fn list_locations(&self) -> Result<Vec<Location>, CampusGraphRepositoryError>;

    /// Every connection on campus.
    async fn list_connections(&self) -> Result<Vec<Connection>, CampusGraphRepositoryError>;

    /// Locations whose id is in `ids`; unknown ids are skipped.
    async fn find_locations(
        &self,
        ids: &[LocationId],
    ) -> Result<Vec<Location>, CampusGraphRepositoryError>;

    /// Connections whose id is in `ids`; unknown ids are skipped.
    async fn find_connections(
        &self,
        ids: &[ConnectionId],
    ) -> Result<Vec<Connection>, CampusGraphRepositoryError>;
}

/// Fixture provider describing an empty campus.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureCampusGraphRepository;

#[async_trait]
impl CampusGraphRepository for FixtureCampusGraphRepository {
    async fn find_location(
        &self,
        _id: LocationId,
    ) -> Result<Option<Location>, CampusGraphRepositoryError> {
        Ok(None)
    }

    async fn list_locations(&self) -> Result<Vec<Location>, CampusGraphRepositoryError> {
        Ok(Vec::new())
    }

    async fn list_connections(&self) -> Result<Vec<Connection>, CampusGraphRepositoryError> {
        Ok(Vec::new())
    }

    async fn find_locations(
        &self,
        _ids: &[LocationId],
    ) -> Result<Vec<Location>, CampusGraphRepositoryError> {
        Ok(Vec::new())
    }

    async fn find_connections(
        &self,
        _ids: &[ConnectionId],
    ) -> Result<Vec<Connection>, CampusGraphRepositoryError> {
        Ok(Vec::new())
    }
}
