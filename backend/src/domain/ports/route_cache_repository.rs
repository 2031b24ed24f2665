//! Port for the route cache: computed routes keyed by their unordered
//! endpoint pair.

use async_trait::async_trait;
use chrono::Utc;

use crate::domain::{CachedRoute, LocationId, NewRoute, RouteId, SavedRoute};

use super::define_port_error;

define_port_error! {
    /// Errors raised by route cache adapters.
    pub enum RouteCacheRepositoryError {
        /// Backing store could not be reached.
        Connection { message: String } =>
            "route cache connection failed: {message}",
        /// Read or write failed during execution.
        Query { message: String } =>
            "route cache query failed: {message}",
    }
}

/// Persisted route lookup with idempotent writes.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RouteCacheRepository: Send + Sync {
    /// Find the route joining `origin` and `destination` in either
    /// orientation.
    async fn find(
        &self,
        origin: LocationId,
        destination: LocationId,
    ) -> Result<Option<CachedRoute>, RouteCacheRepositoryError>;

    /// Store `route` unless an entry already joins the same pair.
    ///
    /// An existing entry is returned unchanged with `created == false`.
    async fn save(&self, route: &NewRoute) -> Result<SavedRoute, RouteCacheRepositoryError>;
}

/// Fixture cache that never holds anything and echoes saves.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureRouteCacheRepository;

#[async_trait]
impl RouteCacheRepository for FixtureRouteCacheRepository {
    async fn find(
        &self,
        _origin: LocationId,
        _destination: LocationId,
    ) -> Result<Option<CachedRoute>, RouteCacheRepositoryError> {
        Ok(None)
    }

    async fn save(&self, route: &NewRoute) -> Result<SavedRoute, RouteCacheRepositoryError> {
        Ok(SavedRoute {
            route: CachedRoute {
                id: RouteId::new(0),
                origin: route.origin,
                destination: route.destination,
                total_distance: route.total_distance,
                legs: route.legs(),
                created_at: Utc::now(),
            },
            created: true,
        })
    }
}
