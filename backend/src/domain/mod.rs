//! Domain primitives, algorithms and services.
//!
//! Purpose: model the campus graph and the route engine independently of
//! HTTP and storage. Adapters in `inbound` and `outbound` talk to this layer
//! only through the traits in [`ports`].
//!
//! Public surface:
//! - `Location`, `Connection` and their ids: campus snapshot types.
//! - `CampusGraph`: adjacency map rebuilt for every computation.
//! - `shortest_path::solve`: Dijkstra search with early exit.
//! - `CachedRoute`, `NewRoute`, `SavedRoute`: route cache records.
//! - `RouteService`: implementation of the `RouteQuery` driving port.
//! - `Error`, `ErrorCode`: transport-agnostic error payload.

pub mod campus;
pub mod error;
pub mod graph;
pub mod ports;
pub mod route;
pub mod route_error;
pub mod route_service;
pub mod shortest_path;
pub mod trace_id;

pub use self::campus::{
    Connection, ConnectionDraft, ConnectionId, ConnectionValidationError, Location, LocationId,
    LocationKind,
};
pub use self::error::{Error, ErrorCode};
pub use self::graph::{Adjacency, CampusGraph};
pub use self::route::{
    CachedRoute, NewRoute, RouteId, RouteLeg, RouteWalkError, SavedRoute, unordered_pair,
};
pub use self::route_error::{Endpoint, RouteError};
pub use self::route_service::{RouteService, RouteServicePorts};
pub use self::shortest_path::ShortestPath;
pub use self::trace_id::TraceId;

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use campus_backend::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<()> {
///     Err(Error::not_found("no such route"))
/// }
/// assert!(handler().is_err());
/// ```
pub type ApiResult<T> = Result<T, Error>;
