//! Single-source Dijkstra search with early exit at the destination.
//!
//! Minimum selection is a linear scan over the unvisited locations in the
//! order they were supplied, so ties go to the earliest location. Campus
//! graphs are small; O(V²) keeps the selection order predictable.

use std::collections::{HashMap, HashSet};

use super::{CampusGraph, ConnectionId, Location, LocationId};

/// A minimum-distance path between two locations.
#[derive(Debug, Clone, PartialEq)]
pub struct ShortestPath {
    /// Locations from origin to destination inclusive.
    pub locations: Vec<LocationId>,
    /// Connections traversed; one fewer than `locations`.
    pub connections: Vec<ConnectionId>,
    /// Sum of the traversed connection distances.
    pub total_distance: f64,
}

/// Find the shortest path from `origin` to `destination`.
///
/// Returns `None` when the destination is unreachable or either endpoint is
/// absent from `locations`.
///
/// # Examples
/// ```
/// use campus_backend::domain::shortest_path::solve;
/// use campus_backend::domain::{
///     CampusGraph, Connection, ConnectionId, Location, LocationId, LocationKind,
/// };
///
/// let kind = LocationKind::new("building");
/// let locations: Vec<Location> = (1..=3)
///     .map(|id| Location::new(LocationId::new(id), format!("L{id}"), None, kind.clone()))
///     .collect();
/// let edge = |id, a, b, d| Connection {
///     id: ConnectionId::new(id),
///     name: None,
///     distance: d,
///     origin: LocationId::new(a),
///     destination: LocationId::new(b),
/// };
/// let connections = vec![edge(1, 1, 2, 5.0), edge(2, 2, 3, 5.0), edge(3, 1, 3, 20.0)];
/// let graph = CampusGraph::build(&locations, &connections);
///
/// let path = solve(&locations, &graph, LocationId::new(1), LocationId::new(3))
///     .expect("path exists");
/// assert_eq!(path.total_distance, 10.0);
/// ```
#[must_use]
pub fn solve(
    locations: &[Location],
    graph: &CampusGraph,
    origin: LocationId,
    destination: LocationId,
) -> Option<ShortestPath> {
    let mut distances: HashMap<LocationId, f64> = locations
        .iter()
        .map(|location| (location.id, f64::INFINITY))
        .collect();
    distances.insert(origin, 0.0);

    let mut predecessors: HashMap<LocationId, (LocationId, ConnectionId)> = HashMap::new();
    let mut visited: HashSet<LocationId> = HashSet::with_capacity(locations.len());
    let mut unvisited: Vec<LocationId> = locations.iter().map(|location| location.id).collect();

    while let Some((slot, current, current_distance)) = closest_unvisited(&unvisited, &distances) {
        if current_distance.is_infinite() {
            return None;
        }
        if current == destination {
            break;
        }
        unvisited.remove(slot);
        visited.insert(current);

        for hop in graph.neighbours(current) {
            if visited.contains(&hop.neighbour) {
                continue;
            }
            let candidate = current_distance + hop.distance;
            let known = distances
                .get(&hop.neighbour)
                .copied()
                .unwrap_or(f64::INFINITY);
            if candidate < known {
                distances.insert(hop.neighbour, candidate);
                predecessors.insert(hop.neighbour, (current, hop.connection));
            }
        }
    }

    let total_distance = distances.get(&destination).copied()?;
    if total_distance.is_infinite() {
        return None;
    }
    let (locations, connections) = reconstruct(&predecessors, origin, destination)?;
    Some(ShortestPath {
        locations,
        connections,
        total_distance,
    })
}

/// Position, id and tentative distance of the closest unvisited location.
fn closest_unvisited(
    unvisited: &[LocationId],
    distances: &HashMap<LocationId, f64>,
) -> Option<(usize, LocationId, f64)> {
    let mut best: Option<(usize, LocationId, f64)> = None;
    for (slot, id) in unvisited.iter().enumerate() {
        let distance = distances.get(id).copied().unwrap_or(f64::INFINITY);
        match best {
            Some((_, _, best_distance)) if distance >= best_distance => {}
            _ => best = Some((slot, *id, distance)),
        }
    }
    best
}

/// Walk predecessors back from `destination` until `origin` is reached.
fn reconstruct(
    predecessors: &HashMap<LocationId, (LocationId, ConnectionId)>,
    origin: LocationId,
    destination: LocationId,
) -> Option<(Vec<LocationId>, Vec<ConnectionId>)> {
    let mut locations = vec![destination];
    let mut connections = Vec::new();
    let mut current = destination;

    while current != origin {
        let (previous, connection) = predecessors.get(&current).copied()?;
        locations.push(previous);
        connections.push(connection);
        current = previous;
        if locations.len() > predecessors.len() + 1 {
            return None;
        }
    }

    locations.reverse();
    connections.reverse();
    Some((locations, connections))
}
