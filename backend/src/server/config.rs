//! HTTP server configuration object and helpers.

use std::net::SocketAddr;

use campus_backend::domain::LocationKind;
use campus_backend::outbound::persistence::DbPool;
use campus_backend::outbound::seed::CampusSeed;

/// Where the campus graph and the route cache live.
pub enum CampusStore {
    /// PostgreSQL via the Diesel adapters.
    Database(DbPool),
    /// A JSON seed served from memory with an in-process route cache.
    Seed(CampusSeed),
}

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) store: CampusStore,
    pub(crate) connector_kind: LocationKind,
    pub(crate) queue_capacity: usize,
}

impl ServerConfig {
    /// Construct a server configuration around a campus store.
    #[must_use]
    pub fn new(bind_addr: SocketAddr, store: CampusStore) -> Self {
        Self {
            bind_addr,
            store,
            connector_kind: LocationKind::new(LocationKind::DEFAULT_CONNECTOR),
            queue_capacity: 64,
        }
    }

    /// Override the kind reserved for waypoint-only locations.
    #[must_use]
    pub fn with_connector_kind(mut self, kind: LocationKind) -> Self {
        self.connector_kind = kind;
        self
    }

    /// Override the route persistence queue bound.
    #[must_use]
    pub fn with_queue_capacity(mut self, capacity: usize) -> Self {
        self.queue_capacity = capacity;
        self
    }
}
