//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match `backend/migrations` exactly. Regenerate
//! with `diesel print-schema` when a migration changes a table.

diesel::table! {
    /// Campus points of interest and connector nodes.
    locations (id) {
        /// Primary key.
        id -> Int4,
        /// Display name.
        name -> Varchar,
        /// Horizontal map position as a percentage of the map width.
        x_coord -> Nullable<Float8>,
        /// Vertical map position as a percentage of the map height.
        y_coord -> Nullable<Float8>,
        /// Type classifier; connector nodes use the configured kind.
        kind -> Varchar,
    }
}

diesel::table! {
    /// Undirected weighted edges between locations.
    ///
    /// CHECK constraints enforce `distance >= 0` and distinct endpoints.
    connections (id) {
        /// Primary key.
        id -> Int4,
        /// Optional display name.
        name -> Nullable<Varchar>,
        /// Length in metres.
        distance -> Float8,
        /// Endpoint the connection was recorded from.
        origin_id -> Int4,
        /// Endpoint the connection was recorded to.
        destination_id -> Int4,
    }
}

diesel::table! {
    /// Cached shortest paths.
    ///
    /// A unique expression index on `(LEAST(origin_id, destination_id),
    /// GREATEST(origin_id, destination_id))` keeps one row per unordered pair.
    routes (id) {
        /// Primary key.
        id -> Int4,
        /// Origin the route was computed from.
        origin_id -> Int4,
        /// Destination the route was computed to.
        destination_id -> Int4,
        /// Path length in metres.
        total_distance -> Float8,
        /// Insertion timestamp.
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Ordered connections of each cached route.
    route_connections (route_id, position) {
        /// Owning route.
        route_id -> Int4,
        /// Connection traversed.
        connection_id -> Int4,
        /// Zero-based position within the route.
        position -> Int4,
    }
}

diesel::joinable!(route_connections -> routes (route_id));
diesel::joinable!(route_connections -> connections (connection_id));

diesel::allow_tables_to_appear_in_same_query!(locations, connections, routes, route_connections);
