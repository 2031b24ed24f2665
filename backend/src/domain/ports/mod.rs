//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Driven ports (`CampusGraphRepository`, `RouteCacheRepository`,
//! `RoutePersistenceQueue`, `RouteMetrics`) describe what the route service
//! needs from infrastructure. Each exposes a typed error so adapters map
//! their failures into predictable variants. `RouteQuery` is the driving
//! port called by inbound adapters.

mod macros;
pub(crate) use macros::define_port_error;

mod campus_graph_repository;
mod route_cache_repository;
mod route_metrics;
mod route_persistence_queue;
mod route_query;

#[cfg(test)]
pub use campus_graph_repository::MockCampusGraphRepository;
pub use campus_graph_repository::{
    CampusGraphRepository, CampusGraphRepositoryError, FixtureCampusGraphRepository,
};
#[cfg(test)]
pub use route_cache_repository::MockRouteCacheRepository;
pub use route_cache_repository::{
    FixtureRouteCacheRepository, RouteCacheRepository, RouteCacheRepositoryError,
};
#[cfg(test)]
pub use route_metrics::MockRouteMetrics;
pub use route_metrics::{NoOpRouteMetrics, RouteMetrics, RouteMetricsError};
#[cfg(test)]
pub use route_persistence_queue::MockRoutePersistenceQueue;
pub use route_persistence_queue::{
    FixtureRoutePersistenceQueue, PersistRoute, RoutePersistenceQueue,
    RoutePersistenceQueueError,
};
pub use route_query::{
    FixtureRouteQuery, RouteQuery, RouteRequest, RouteView, SaveRouteRequest, SavedRouteView,
};
