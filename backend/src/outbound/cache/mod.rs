//! In-process route cache adapter.
//!
//! Used when no database is configured and by behaviour tests. Entries are
//! keyed by the unordered endpoint pair under one mutex, so the
//! check-then-insert of [`RouteCacheRepository::save`] is atomic.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;

use crate::domain::ports::{RouteCacheRepository, RouteCacheRepositoryError};
use crate::domain::{CachedRoute, LocationId, NewRoute, RouteId, SavedRoute, unordered_pair};

#[derive(Debug, Default)]
struct Entries {
    next_id: i32,
    by_pair: HashMap<(LocationId, LocationId), CachedRoute>,
}

/// Route cache held in memory for the lifetime of the process.
#[derive(Debug, Default)]
pub struct InMemoryRouteCacheRepository {
    entries: Mutex<Entries>,
}

impl InMemoryRouteCacheRepository {
    /// Create an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of cached routes.
    pub fn len(&self) -> usize {
        self.entries
            .lock()
            .map(|entries| entries.by_pair.len())
            .unwrap_or_default()
    }

    /// Whether the cache holds no routes.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, Entries>, RouteCacheRepositoryError> {
        self.entries
            .lock()
            .map_err(|_| RouteCacheRepositoryError::connection("route cache lock poisoned"))
    }
}

#[async_trait]
impl RouteCacheRepository for InMemoryRouteCacheRepository {
    async fn find(
        &self,
        origin: LocationId,
        destination: LocationId,
    ) -> Result<Option<CachedRoute>, RouteCacheRepositoryError> {
        let entries = self.lock()?;
        Ok(entries
            .by_pair
            .get(&unordered_pair(origin, destination))
            .cloned())
    }

    async fn save(&self, route: &NewRoute) -> Result<SavedRoute, RouteCacheRepositoryError> {
        let mut entries = self.lock()?;
        if let Some(existing) = entries.by_pair.get(&route.pair_key()) {
            return Ok(SavedRoute {
                route: existing.clone(),
                created: false,
            });
        }

        entries.next_id += 1;
        let cached = CachedRoute {
            id: RouteId::new(entries.next_id),
            origin: route.origin,
            destination: route.destination,
            total_distance: route.total_distance,
            legs: route.legs(),
            created_at: Utc::now(),
        };
        entries.by_pair.insert(route.pair_key(), cached.clone());
        Ok(SavedRoute {
            route: cached,
            created: true,
        })
    }
}
