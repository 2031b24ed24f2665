//! Route endpoint DTOs.
//!
//! The success envelope is `{ success: true, cached, data }` with `data`
//! holding the drawable location and connection sequences.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::ports::RouteView;
use crate::domain::{Connection, Location};

#[derive(Debug, Deserialize)]
pub(super) struct RoutePath {
    pub(super) origin_id: String,
    pub(super) destination_id: String,
}

/// Request payload for a fresh computation.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CalculateRouteRequest {
    #[schema(example = 1)]
    pub origin_id: Option<i32>,
    #[schema(example = 4)]
    pub destination_id: Option<i32>,
}

/// Request payload for an explicit cache write.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SaveRouteRequestBody {
    pub origin_id: Option<i32>,
    pub destination_id: Option<i32>,
    /// Path length in metres.
    pub total_distance: Option<f64>,
    /// Connections from origin to destination, in order.
    #[schema(max_items = 10_000)]
    pub connection_ids: Option<Vec<i32>>,
}

/// A location on the route.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct LocationResponse {
    pub id: i32,
    pub name: String,
    /// Percentage of the map width.
    pub x: Option<f64>,
    /// Percentage of the map height.
    pub y: Option<f64>,
}

/// A connection traversed by the route.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ConnectionResponse {
    pub id: i32,
    pub name: Option<String>,
    /// Length in metres.
    pub distance: f64,
    pub origin_id: i32,
    pub destination_id: i32,
}

/// Route body shared by every route endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RouteData {
    pub locations: Vec<LocationResponse>,
    pub connections: Vec<ConnectionResponse>,
    pub total_distance: f64,
}

/// Success envelope for route endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct RouteResponse {
    #[schema(example = true)]
    pub success: bool,
    /// Whether the route came from the route cache.
    pub cached: bool,
    pub data: RouteData,
}

impl From<Location> for LocationResponse {
    fn from(location: Location) -> Self {
        Self {
            id: location.id.get(),
            name: location.name,
            x: location.x,
            y: location.y,
        }
    }
}

impl From<Connection> for ConnectionResponse {
    fn from(connection: Connection) -> Self {
        Self {
            id: connection.id.get(),
            name: connection.name,
            distance: connection.distance,
            origin_id: connection.origin.get(),
            destination_id: connection.destination.get(),
        }
    }
}

impl From<RouteView> for RouteResponse {
    fn from(view: RouteView) -> Self {
        let RouteView {
            locations,
            connections,
            total_distance,
            cached,
        } = view;
        Self {
            success: true,
            cached,
            data: RouteData {
                locations: locations.into_iter().map(Into::into).collect(),
                connections: connections.into_iter().map(Into::into).collect(),
                total_distance,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;
    use serde_json::json;

    use super::*;
    use crate::domain::{ConnectionDraft, ConnectionId, LocationId, LocationKind};

    #[rstest]
    fn view_serialises_to_camel_case_envelope() {
        let library = Location::new(
            LocationId::new(1),
            "Library",
            Some((22.5, 31.0)),
            LocationKind::new("building"),
        );
        let gym = Location::new(LocationId::new(4), "Gym", None, LocationKind::new("sports"));
        let path = Connection::new(ConnectionDraft {
            id: ConnectionId::new(9),
            name: None,
            distance: 60.0,
            origin: LocationId::new(4),
            destination: LocationId::new(1),
        })
        .expect("valid connection");

        let response = RouteResponse::from(RouteView {
            locations: vec![library, gym],
            connections: vec![path],
            total_distance: 60.0,
            cached: false,
        });

        assert_eq!(
            serde_json::to_value(&response).expect("serialises"),
            json!({
                "success": true,
                "cached": false,
                "data": {
                    "locations": [
                        { "id": 1, "name": "Library", "x": 22.5, "y": 31.0 },
                        { "id": 4, "name": "Gym", "x": null, "y": null }
                    ],
                    "connections": [
                        { "id": 9, "name": null, "distance": 60.0, "originId": 4, "destinationId": 1 }
                    ],
                    "totalDistance": 60.0
                }
            })
        );
    }
}
