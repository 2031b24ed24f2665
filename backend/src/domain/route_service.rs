//! Route service implementing the [`RouteQuery`] driving port.
//!
//! Every request is validated before the cache or the campus graph is
//! touched. Lookups prefer the route cache; misses compute a fresh shortest
//! path and hand it to the persistence queue without waiting for the write.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, warn};

use crate::domain::ports::{
    CampusGraphRepository, CampusGraphRepositoryError, PersistRoute, RouteCacheRepository,
    RouteCacheRepositoryError, RouteMetrics, RoutePersistenceQueue, RouteQuery, RouteRequest,
    RouteView, SaveRouteRequest, SavedRouteView,
};
use crate::domain::route::walk_from_origin;
use crate::domain::shortest_path::{self, ShortestPath};
use crate::domain::{
    CachedRoute, CampusGraph, Connection, Endpoint, Location, LocationId,
    LocationKind, NewRoute, RouteError,
};

fn map_graph_error(error: CampusGraphRepositoryError) -> RouteError {
    RouteError::data_load(error.to_string())
}

fn map_cache_error(error: RouteCacheRepositoryError) -> RouteError {
    RouteError::persistence(error.to_string())
}

/// Driven ports the route service is wired with.
#[derive(Clone)]
pub struct RouteServicePorts {
    /// Campus locations and connections.
    pub graph: Arc<dyn CampusGraphRepository>,
    /// Computed-route cache.
    pub cache: Arc<dyn RouteCacheRepository>,
    /// Background cache writes.
    pub queue: Arc<dyn RoutePersistenceQueue>,
    /// Cache hit/miss counters.
    pub metrics: Arc<dyn RouteMetrics>,
}

/// Route lookups over a campus graph with a persisted route cache.
#[derive(Clone)]
pub struct RouteService {
    graph: Arc<dyn CampusGraphRepository>,
    cache: Arc<dyn RouteCacheRepository>,
    queue: Arc<dyn RoutePersistenceQueue>,
    metrics: Arc<dyn RouteMetrics>,
    connector_kind: LocationKind,
}

impl RouteService {
    /// Create a service that treats [`LocationKind::DEFAULT_CONNECTOR`]
    /// locations as waypoints only.
    pub fn new(ports: RouteServicePorts) -> Self {
        let RouteServicePorts {
            graph,
            cache,
            queue,
            metrics,
        } = ports;
        Self {
            graph,
            cache,
            queue,
            metrics,
            connector_kind: LocationKind::new(LocationKind::DEFAULT_CONNECTOR),
        }
    }

    /// Override the kind reserved for waypoint-only locations.
    #[must_use]
    pub fn with_connector_kind(mut self, kind: LocationKind) -> Self {
        self.connector_kind = kind;
        self
    }

    async fn find_endpoint(&self, id: LocationId) -> Result<Option<Location>, RouteError> {
        self.graph.find_location(id).await.map_err(map_graph_error)
    }

    fn ensure_routable(&self, endpoint: Endpoint, location: &Location) -> Result<(), RouteError> {
        if location.kind == self.connector_kind {
            return Err(RouteError::invalid_endpoint(
                endpoint,
                format!(
                    "{endpoint} {} is an internal connector and cannot start or end a route",
                    location.id
                ),
            ));
        }
        Ok(())
    }

    /// Endpoints must differ, then every resolved endpoint must be routable,
    /// then both must exist. A connector origin is reported even when the
    /// destination is missing.
    async fn validate(&self, request: RouteRequest) -> Result<(), RouteError> {
        let RouteRequest {
            origin_id,
            destination_id,
        } = request;
        if origin_id == destination_id {
            return Err(RouteError::invalid_request(
                "origin and destination must differ",
            ));
        }
        let origin = self.find_endpoint(origin_id).await?;
        let destination = self.find_endpoint(destination_id).await?;
        for (endpoint, location) in [
            (Endpoint::Origin, &origin),
            (Endpoint::Destination, &destination),
        ] {
            if let Some(location) = location {
                self.ensure_routable(endpoint, location)?;
            }
        }
        for (endpoint, id, location) in [
            (Endpoint::Origin, origin_id, &origin),
            (Endpoint::Destination, destination_id, &destination),
        ] {
            if location.is_none() {
                return Err(RouteError::NotFoundEndpoint { endpoint, id });
            }
        }
        Ok(())
    }

    async fn compute(
        &self,
        origin: LocationId,
        destination: LocationId,
    ) -> Result<(RouteView, NewRoute), RouteError> {
        let locations = self.graph.list_locations().await.map_err(map_graph_error)?;
        let connections = self
            .graph
            .list_connections()
            .await
            .map_err(map_graph_error)?;
        let graph = CampusGraph::build(&locations, &connections);

        let Some(path) = shortest_path::solve(&locations, &graph, origin, destination) else {
            debug!(%origin, %destination, "no path between locations");
            return Err(RouteError::NoPathExists {
                origin,
                destination,
            });
        };
        debug!(
            %origin,
            %destination,
            hops = path.connections.len(),
            total_distance = path.total_distance,
            "computed shortest path"
        );

        let view = view_of_path(&path, &locations, &connections)?;
        let route = NewRoute {
            origin,
            destination,
            total_distance: path.total_distance,
            connection_ids: path.connections,
        };
        Ok((view, route))
    }

    /// Look the pair up in the cache and expand a hit into a full view.
    async fn read_cached(
        &self,
        origin: LocationId,
        destination: LocationId,
    ) -> Result<Option<RouteView>, RouteError> {
        let Some(route) = self
            .cache
            .find(origin, destination)
            .await
            .map_err(map_cache_error)?
        else {
            return Ok(None);
        };
        self.expand(&route).await.map(Some)
    }

    /// Rebuild the location sequence of a cached route.
    ///
    /// The walk starts at the stored origin, whichever orientation was
    /// requested.
    async fn expand(&self, route: &CachedRoute) -> Result<RouteView, RouteError> {
        let ids = route.connection_ids();
        let connections = self
            .graph
            .find_connections(&ids)
            .await
            .map_err(map_graph_error)?;
        let visited = walk_from_origin(route.origin, route.destination, &ids, &connections)
            .map_err(|err| {
                RouteError::persistence(format!("cached route {} is inconsistent: {err}", route.id))
            })?;
        let locations = self
            .graph
            .find_locations(&visited)
            .await
            .map_err(map_graph_error)?;

        let locations = ordered(&visited, &locations, |location| location.id).ok_or_else(|| {
            RouteError::persistence(format!(
                "cached route {} references a missing location",
                route.id
            ))
        })?;
        let connections = ordered(&ids, &connections, |connection| connection.id).ok_or_else(
            || {
                RouteError::persistence(format!(
                    "cached route {} references a missing connection",
                    route.id
                ))
            },
        )?;

        Ok(RouteView {
            locations,
            connections,
            total_distance: route.total_distance,
            cached: true,
        })
    }

    async fn enqueue(&self, route: NewRoute) {
        let (origin, destination) = (route.origin, route.destination);
        if let Err(err) = self.queue.enqueue(PersistRoute::new(route)).await {
            warn!(%origin, %destination, error = %err, "dropping route persistence command");
        }
    }

    async fn record_hit(&self) {
        if let Err(err) = self.metrics.record_cache_hit().await {
            debug!(error = %err, "failed to record route cache hit");
        }
    }

    async fn record_miss(&self) {
        if let Err(err) = self.metrics.record_cache_miss().await {
            debug!(error = %err, "failed to record route cache miss");
        }
    }
}

/// Map every id to its record, preserving the order of `ids`.
fn ordered<T, K, F>(ids: &[K], records: &[T], key: F) -> Option<Vec<T>>
where
    T: Clone,
    K: std::hash::Hash + Eq,
    F: Fn(&T) -> K,
{
    let by_id: HashMap<K, &T> = records.iter().map(|record| (key(record), record)).collect();
    ids.iter()
        .map(|id| by_id.get(id).map(|record| (*record).clone()))
        .collect()
}

fn view_of_path(
    path: &ShortestPath,
    locations: &[Location],
    connections: &[Connection],
) -> Result<RouteView, RouteError> {
    let inconsistent = || RouteError::data_load("campus graph changed during computation");
    let locations = ordered(&path.locations, locations, |location| location.id)
        .ok_or_else(inconsistent)?;
    let connections = ordered(&path.connections, connections, |connection| connection.id)
        .ok_or_else(inconsistent)?;
    Ok(RouteView {
        locations,
        connections,
        total_distance: path.total_distance,
        cached: false,
    })
}

#[async_trait]
impl RouteQuery for RouteService {
    async fn get_route(&self, request: RouteRequest) -> Result<RouteView, RouteError> {
        self.validate(request).await?;
        let RouteRequest {
            origin_id,
            destination_id,
        } = request;

        match self.read_cached(origin_id, destination_id).await {
            Ok(Some(view)) => {
                debug!(origin = %origin_id, destination = %destination_id, "route cache hit");
                self.record_hit().await;
                return Ok(view);
            }
            Ok(None) => {
                debug!(origin = %origin_id, destination = %destination_id, "route cache miss");
            }
            Err(err) => {
                warn!(
                    origin = %origin_id,
                    destination = %destination_id,
                    error = %err,
                    "route cache read failed; computing instead"
                );
            }
        }
        self.record_miss().await;

        let (view, route) = self.compute(origin_id, destination_id).await?;
        self.enqueue(route).await;
        Ok(view)
    }

    async fn find_cached(&self, request: RouteRequest) -> Result<RouteView, RouteError> {
        self.validate(request).await?;
        let RouteRequest {
            origin_id,
            destination_id,
        } = request;

        match self.read_cached(origin_id, destination_id).await? {
            Some(view) => {
                self.record_hit().await;
                Ok(view)
            }
            None => {
                self.record_miss().await;
                Err(RouteError::NotCached {
                    origin: origin_id,
                    destination: destination_id,
                })
            }
        }
    }

    async fn calculate(&self, request: RouteRequest) -> Result<RouteView, RouteError> {
        self.validate(request).await?;
        let (view, _) = self
            .compute(request.origin_id, request.destination_id)
            .await?;
        Ok(view)
    }

    async fn save_route(&self, request: SaveRouteRequest) -> Result<SavedRouteView, RouteError> {
        let SaveRouteRequest {
            origin_id,
            destination_id,
            total_distance,
            connection_ids,
        } = request;
        self.validate(RouteRequest {
            origin_id,
            destination_id,
        })
        .await?;

        if !total_distance.is_finite() || total_distance < 0.0 {
            return Err(RouteError::invalid_request(
                "total distance must be a finite, non-negative number",
            ));
        }
        let connections = self
            .graph
            .find_connections(&connection_ids)
            .await
            .map_err(map_graph_error)?;
        walk_from_origin(origin_id, destination_id, &connection_ids, &connections).map_err(
            |err| RouteError::invalid_request(format!("connections do not form a route: {err}")),
        )?;

        let saved = self
            .cache
            .save(&NewRoute {
                origin: origin_id,
                destination: destination_id,
                total_distance,
                connection_ids,
            })
            .await
            .map_err(map_cache_error)?;
        debug!(
            route = %saved.route.id,
            created = saved.created,
            "saved route to cache"
        );

        let mut route = self.expand(&saved.route).await?;
        route.cached = !saved.created;
        Ok(SavedRouteView {
            route,
            created: saved.created,
        })
    }
}

#[cfg(test)]
#[path = "route_service_tests.rs"]
mod tests;
