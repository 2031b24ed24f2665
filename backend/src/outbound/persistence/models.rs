//! Internal Diesel row structs for database operations.
//!
//! These types are implementation details of the persistence layer and must
//! never be exposed to the domain.

use chrono::{DateTime, Utc};
use diesel::prelude::*;

use super::schema::{connections, locations, route_connections, routes};

/// Row struct for reading from the locations table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = locations)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct LocationRow {
    pub id: i32,
    pub name: String,
    pub x_coord: Option<f64>,
    pub y_coord: Option<f64>,
    pub kind: String,
}

/// Row struct for reading from the connections table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = connections)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct ConnectionRow {
    pub id: i32,
    pub name: Option<String>,
    pub distance: f64,
    pub origin_id: i32,
    pub destination_id: i32,
}

/// Row struct for reading from the routes table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = routes)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct RouteRow {
    pub id: i32,
    pub origin_id: i32,
    pub destination_id: i32,
    pub total_distance: f64,
    pub created_at: DateTime<Utc>,
}

/// Insertable struct for new cached routes.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = routes)]
pub(crate) struct NewRouteRow {
    pub origin_id: i32,
    pub destination_id: i32,
    pub total_distance: f64,
}

/// Row struct for reading and writing route legs.
#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = route_connections)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct RouteConnectionRow {
    pub route_id: i32,
    pub connection_id: i32,
    pub position: i32,
}
