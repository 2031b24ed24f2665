//! Adjacency structure built from a flat campus snapshot.
//!
//! The graph is rebuilt for every computation; nothing is cached between
//! requests so location and connection edits are visible immediately.

use std::collections::HashMap;

use super::{Connection, ConnectionId, Location, LocationId};

/// One hop reachable from a location.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Adjacency {
    /// Location at the far end of the hop.
    pub neighbour: LocationId,
    /// Hop length in metres.
    pub distance: f64,
    /// Connection traversed.
    pub connection: ConnectionId,
}

/// Undirected weighted adjacency map keyed by location id.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CampusGraph {
    adjacency: HashMap<LocationId, Vec<Adjacency>>,
}

impl CampusGraph {
    /// Build the adjacency map, adding every connection in both directions.
    ///
    /// Connections whose endpoints are not among `locations` contribute
    /// nothing, as do self-referencing connections.
    ///
    /// # Examples
    /// ```
    /// use campus_backend::domain::{
    ///     CampusGraph, Connection, ConnectionDraft, ConnectionId, Location, LocationId,
    ///     LocationKind,
    /// };
    ///
    /// let kind = LocationKind::new("building");
    /// let locations = vec![
    ///     Location::new(LocationId::new(1), "A", None, kind.clone()),
    ///     Location::new(LocationId::new(2), "B", None, kind),
    /// ];
    /// let connections = vec![Connection::new(ConnectionDraft {
    ///     id: ConnectionId::new(10),
    ///     name: None,
    ///     distance: 5.0,
    ///     origin: LocationId::new(1),
    ///     destination: LocationId::new(2),
    /// })
    /// .expect("valid connection")];
    ///
    /// let graph = CampusGraph::build(&locations, &connections);
    /// assert_eq!(graph.neighbours(LocationId::new(2)).len(), 1);
    /// ```
    #[must_use]
    pub fn build(locations: &[Location], connections: &[Connection]) -> Self {
        let mut adjacency: HashMap<LocationId, Vec<Adjacency>> = locations
            .iter()
            .map(|location| (location.id, Vec::new()))
            .collect();

        for connection in connections {
            if connection.origin == connection.destination {
                continue;
            }
            if !(adjacency.contains_key(&connection.origin)
                && adjacency.contains_key(&connection.destination))
            {
                continue;
            }
            for (from, to) in [
                (connection.origin, connection.destination),
                (connection.destination, connection.origin),
            ] {
                if let Some(hops) = adjacency.get_mut(&from) {
                    hops.push(Adjacency {
                        neighbour: to,
                        distance: connection.distance,
                        connection: connection.id,
                    });
                }
            }
        }

        Self { adjacency }
    }

    /// Hops leaving `location`; empty for unknown ids.
    #[must_use]
    pub fn neighbours(&self, location: LocationId) -> &[Adjacency] {
        self.adjacency
            .get(&location)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Number of locations in the graph.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.adjacency.len()
    }
}
