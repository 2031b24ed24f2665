//! Cached routes and the rules for walking them.
//!
//! A cached route stores the origin and destination it was computed for and
//! the ordered connection ids of the path. Location sequences are not stored;
//! they are recovered by walking the connections from the stored origin.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::{Connection, ConnectionId, LocationId};

/// Identifier of a persisted route.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RouteId(i32);

impl RouteId {
    /// Wrap a raw identifier.
    #[must_use]
    pub const fn new(raw: i32) -> Self {
        Self(raw)
    }

    /// Raw identifier value.
    #[must_use]
    pub const fn get(self) -> i32 {
        self.0
    }
}

impl std::fmt::Display for RouteId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One connection of a cached route and its zero-based position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteLeg {
    /// Connection traversed.
    pub connection: ConnectionId,
    /// Position in the route, starting at zero.
    pub position: i32,
}

/// A previously computed route held by the route cache.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CachedRoute {
    /// Stable identifier.
    pub id: RouteId,
    /// Origin the route was first computed from.
    pub origin: LocationId,
    /// Destination the route was first computed to.
    pub destination: LocationId,
    /// Sum of the leg distances in metres.
    pub total_distance: f64,
    /// Legs in any order; see [`CachedRoute::connection_ids`].
    pub legs: Vec<RouteLeg>,
    /// When the route was first stored.
    pub created_at: DateTime<Utc>,
}

impl CachedRoute {
    /// Connection ids ordered by leg position.
    #[must_use]
    pub fn connection_ids(&self) -> Vec<ConnectionId> {
        let mut legs = self.legs.clone();
        legs.sort_by_key(|leg| leg.position);
        legs.into_iter().map(|leg| leg.connection).collect()
    }

    /// Whether the route joins `a` and `b` in either orientation.
    #[must_use]
    pub fn joins(&self, a: LocationId, b: LocationId) -> bool {
        (self.origin == a && self.destination == b) || (self.origin == b && self.destination == a)
    }
}

/// A route to be written to the cache.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewRoute {
    /// Origin of the computed path.
    pub origin: LocationId,
    /// Destination of the computed path.
    pub destination: LocationId,
    /// Path length in metres.
    pub total_distance: f64,
    /// Connections from origin to destination, in order.
    pub connection_ids: Vec<ConnectionId>,
}

impl NewRoute {
    /// The endpoint pair with the smaller id first.
    ///
    /// Both orientations of a route share one key.
    ///
    /// # Examples
    /// ```
    /// use campus_backend::domain::{LocationId, NewRoute};
    ///
    /// let route = NewRoute {
    ///     origin: LocationId::new(9),
    ///     destination: LocationId::new(2),
    ///     total_distance: 4.0,
    ///     connection_ids: Vec::new(),
    /// };
    /// assert_eq!(route.pair_key(), (LocationId::new(2), LocationId::new(9)));
    /// ```
    #[must_use]
    pub fn pair_key(&self) -> (LocationId, LocationId) {
        unordered_pair(self.origin, self.destination)
    }

    /// Legs tagged with their zero-based position.
    #[must_use]
    pub fn legs(&self) -> Vec<RouteLeg> {
        self.connection_ids
            .iter()
            .zip(0..)
            .map(|(connection, position)| RouteLeg {
                connection: *connection,
                position,
            })
            .collect()
    }
}

/// Result of saving a route: the stored entry and whether this call created it.
#[derive(Debug, Clone, PartialEq)]
pub struct SavedRoute {
    /// Entry held by the cache after the save.
    pub route: CachedRoute,
    /// `false` when an entry for the pair already existed and was returned.
    pub created: bool,
}

/// Order a location pair so the smaller id comes first.
#[must_use]
pub fn unordered_pair(a: LocationId, b: LocationId) -> (LocationId, LocationId) {
    if a <= b { (a, b) } else { (b, a) }
}

/// Reasons a connection sequence does not form a route.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RouteWalkError {
    /// A connection id is unknown to the graph provider.
    #[error("connection {connection} does not exist")]
    UnknownConnection {
        /// Missing connection.
        connection: ConnectionId,
    },
    /// A connection does not touch the location reached so far.
    #[error("connection {connection} does not touch location {at}")]
    Disconnected {
        /// Offending connection.
        connection: ConnectionId,
        /// Location reached before the connection.
        at: LocationId,
    },
    /// The walk passed through the destination before its final leg.
    #[error("route reaches destination {destination} before its final connection")]
    EarlyArrival {
        /// Destination visited too soon.
        destination: LocationId,
    },
    /// The walk ended somewhere other than the destination.
    #[error("route ends at {reached} instead of {destination}")]
    WrongTerminus {
        /// Expected final location.
        destination: LocationId,
        /// Location actually reached.
        reached: LocationId,
    },
}

/// Walk `legs` from `origin`, returning every location visited.
///
/// Each connection's far end becomes the next location. The walk must end at
/// `destination` and may only reach it on the final leg.
///
/// # Examples
/// ```
/// use campus_backend::domain::route::walk_from_origin;
/// use campus_backend::domain::{Connection, ConnectionId, LocationId};
///
/// let connections = vec![
///     Connection {
///         id: ConnectionId::new(1),
///         name: None,
///         distance: 5.0,
///         origin: LocationId::new(1),
///         destination: LocationId::new(2),
///     },
///     Connection {
///         id: ConnectionId::new(2),
///         name: None,
///         distance: 5.0,
///         origin: LocationId::new(3),
///         destination: LocationId::new(2),
///     },
/// ];
///
/// let visited = walk_from_origin(
///     LocationId::new(1),
///     LocationId::new(3),
///     &[ConnectionId::new(1), ConnectionId::new(2)],
///     &connections,
/// )
/// .expect("consistent route");
/// assert_eq!(
///     visited,
///     vec![LocationId::new(1), LocationId::new(2), LocationId::new(3)]
/// );
/// ```
pub fn walk_from_origin(
    origin: LocationId,
    destination: LocationId,
    legs: &[ConnectionId],
    connections: &[Connection],
) -> Result<Vec<LocationId>, RouteWalkError> {
    let by_id: HashMap<ConnectionId, &Connection> = connections
        .iter()
        .map(|connection| (connection.id, connection))
        .collect();

    let mut visited = Vec::with_capacity(legs.len() + 1);
    visited.push(origin);
    let mut current = origin;

    for (index, id) in legs.iter().enumerate() {
        if current == destination && index > 0 {
            return Err(RouteWalkError::EarlyArrival { destination });
        }
        let connection = by_id
            .get(id)
            .ok_or(RouteWalkError::UnknownConnection { connection: *id })?;
        current = connection
            .other_end(current)
            .ok_or(RouteWalkError::Disconnected {
                connection: *id,
                at: current,
            })?;
        visited.push(current);
    }

    if current != destination {
        return Err(RouteWalkError::WrongTerminus {
            destination,
            reached: current,
        });
    }
    Ok(visited)
}
