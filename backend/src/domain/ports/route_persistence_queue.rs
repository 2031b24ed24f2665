//! Port for handing computed routes to background persistence.
//!
//! Enqueueing never waits for the write. Adapters report a full or closed
//! queue so the caller can log the dropped command.

use async_trait::async_trait;

use crate::domain::{NewRoute, TraceId};

use super::define_port_error;

define_port_error! {
    /// Errors raised when a persistence command cannot be queued.
    pub enum RoutePersistenceQueueError {
        /// The queue is at capacity.
        Full { message: String } => "route persistence queue is full: {message}",
        /// The worker has stopped.
        Closed { message: String } => "route persistence queue is closed: {message}",
    }
}

/// Command asking the background worker to cache a computed route.
#[derive(Debug, Clone, PartialEq)]
pub struct PersistRoute {
    /// Route to store.
    pub route: NewRoute,
    /// Trace of the request that computed the route.
    pub trace_id: Option<TraceId>,
}

impl PersistRoute {
    /// Build a command carrying the trace identifier currently in scope.
    pub fn new(route: NewRoute) -> Self {
        Self {
            route,
            trace_id: TraceId::current(),
        }
    }
}

/// Fire-and-forget dispatch of route persistence work.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RoutePersistenceQueue: Send + Sync {
    /// Queue `command` without waiting for it to be processed.
    async fn enqueue(&self, command: PersistRoute) -> Result<(), RoutePersistenceQueueError>;
}

/// Fixture queue that accepts and discards every command.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureRoutePersistenceQueue;

#[async_trait]
impl RoutePersistenceQueue for FixtureRoutePersistenceQueue {
    async fn enqueue(&self, _command: PersistRoute) -> Result<(), RoutePersistenceQueueError> {
        Ok(())
    }
}
