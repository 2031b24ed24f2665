//! Builders wiring the route service to its driven adapters.

use std::sync::Arc;

use actix_web::web;
use tokio::task::JoinHandle;
use tracing::info;

#[cfg(not(feature = "metrics"))]
use campus_backend::domain::ports::NoOpRouteMetrics;
use campus_backend::domain::ports::{CampusGraphRepository, RouteCacheRepository, RouteMetrics};
use campus_backend::domain::{RouteService, RouteServicePorts};
use campus_backend::inbound::http::state::HttpState;
use campus_backend::outbound::cache::InMemoryRouteCacheRepository;
#[cfg(feature = "metrics")]
use campus_backend::outbound::metrics::PrometheusRouteMetrics;
use campus_backend::outbound::persistence::{DieselCampusGraphRepository, DieselRouteCacheRepository};
use campus_backend::outbound::queue::TokioRoutePersistenceQueue;
use campus_backend::outbound::seed::InMemoryCampusGraphRepository;

use super::{CampusStore, ServerConfig};

fn build_stores(
    store: &CampusStore,
) -> (Arc<dyn CampusGraphRepository>, Arc<dyn RouteCacheRepository>) {
    match store {
        CampusStore::Database(pool) => {
            info!("serving campus graph and route cache from PostgreSQL");
            (
                Arc::new(DieselCampusGraphRepository::new(pool.clone())),
                Arc::new(DieselRouteCacheRepository::new(pool.clone())),
            )
        }
        CampusStore::Seed(seed) => {
            info!(
                locations = seed.locations().len(),
                connections = seed.connections().len(),
                "serving campus graph from seed with in-memory route cache"
            );
            (
                Arc::new(InMemoryCampusGraphRepository::new(seed.clone())),
                Arc::new(InMemoryRouteCacheRepository::new()),
            )
        }
    }
}

/// Register the cache counters on the Prometheus registry.
///
/// # Errors
/// Returns [`std::io::Error`] if Prometheus metric registration fails.
#[cfg(feature = "metrics")]
pub(crate) fn prometheus_route_metrics(
    prometheus: &actix_web_prom::PrometheusMetrics,
) -> std::io::Result<Arc<dyn RouteMetrics>> {
    let metrics = PrometheusRouteMetrics::new(&prometheus.registry)
        .map_err(|e| std::io::Error::other(format!("route metrics registration failed: {e}")))?;
    Ok(Arc::new(metrics))
}

/// Cache metrics recorder for builds without the `metrics` feature.
#[cfg(not(feature = "metrics"))]
pub(crate) fn noop_route_metrics() -> Arc<dyn RouteMetrics> {
    Arc::new(NoOpRouteMetrics)
}

/// Build handler state and spawn the route persistence worker.
///
/// Must be called inside a tokio runtime. The returned handle completes
/// once every queue clone is dropped and the channel has drained.
pub(crate) fn build_http_state(
    config: &ServerConfig,
    metrics: Arc<dyn RouteMetrics>,
) -> (web::Data<HttpState>, JoinHandle<()>) {
    let (graph, cache) = build_stores(&config.store);
    let (queue, worker) = TokioRoutePersistenceQueue::spawn(config.queue_capacity, cache.clone());

    let service = RouteService::new(RouteServicePorts {
        graph,
        cache,
        queue: Arc::new(queue),
        metrics,
    })
    .with_connector_kind(config.connector_kind.clone());

    (web::Data::new(HttpState::new(Arc::new(service))), worker)
}
