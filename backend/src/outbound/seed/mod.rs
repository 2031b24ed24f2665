//! JSON campus seed and the in-memory graph provider it backs.
//!
//! Used for database-less runs and behaviour tests. The document carries
//! two arrays, `locations` and `connections`, in the same camelCase shape
//! the HTTP adapter returns.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde::Deserialize;
use thiserror::Error;

use crate::domain::ports::{CampusGraphRepository, CampusGraphRepositoryError};
use crate::domain::{
    Connection, ConnectionDraft, ConnectionId, ConnectionValidationError, Location, LocationId,
    LocationKind,
};

/// Path of the seed bundled with the crate.
pub fn default_seed_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("fixtures")
        .join("campus")
        .join("seed.json")
}

/// Errors raised while loading a campus seed.
#[derive(Debug, Error)]
pub enum CampusSeedError {
    /// The seed file could not be read.
    #[error("failed to read campus seed {path}: {source}")]
    Io {
        /// File that failed.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },
    /// The document is not valid seed JSON.
    #[error("failed to parse campus seed: {0}")]
    Parse(#[from] serde_json::Error),
    /// A connection failed domain validation.
    #[error(transparent)]
    InvalidConnection(#[from] ConnectionValidationError),
    /// Two locations share an id.
    #[error("duplicate location id {0}")]
    DuplicateLocation(LocationId),
    /// Two connections share an id.
    #[error("duplicate connection id {0}")]
    DuplicateConnection(ConnectionId),
    /// A connection names a location missing from the seed.
    #[error("connection {connection} references unknown location {location}")]
    UnknownLocation {
        /// Offending connection.
        connection: ConnectionId,
        /// Missing location.
        location: LocationId,
    },
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LocationRecord {
    id: i32,
    name: String,
    x: Option<f64>,
    y: Option<f64>,
    kind: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ConnectionRecord {
    id: i32,
    #[serde(default)]
    name: Option<String>,
    distance: f64,
    origin_id: i32,
    destination_id: i32,
}

#[derive(Debug, Deserialize)]
struct SeedDocument {
    locations: Vec<LocationRecord>,
    #[serde(default)]
    connections: Vec<ConnectionRecord>,
}

/// A validated campus snapshot.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CampusSeed {
    locations: Vec<Location>,
    connections: Vec<Connection>,
}

impl CampusSeed {
    /// Parse and validate a seed document.
    ///
    /// # Examples
    /// ```
    /// use campus_backend::outbound::seed::CampusSeed;
    ///
    /// let seed = CampusSeed::from_json_str(
    ///     r#"{
    ///         "locations": [
    ///             { "id": 1, "name": "Library", "x": 10.0, "y": 20.0, "kind": "building" },
    ///             { "id": 2, "name": "Gym", "x": null, "y": null, "kind": "sports" }
    ///         ],
    ///         "connections": [
    ///             { "id": 1, "distance": 12.5, "originId": 1, "destinationId": 2 }
    ///         ]
    ///     }"#,
    /// )
    /// .expect("valid seed");
    /// assert_eq!(seed.locations().len(), 2);
    /// ```
    pub fn from_json_str(raw: &str) -> Result<Self, CampusSeedError> {
        let document: SeedDocument = serde_json::from_str(raw)?;
        Self::from_document(document)
    }

    /// Read, parse and validate a seed file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, CampusSeedError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| CampusSeedError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&raw)
    }

    fn from_document(document: SeedDocument) -> Result<Self, CampusSeedError> {
        let mut location_ids = HashSet::new();
        let mut locations = Vec::with_capacity(document.locations.len());
        for record in document.locations {
            let id = LocationId::new(record.id);
            if !location_ids.insert(id) {
                return Err(CampusSeedError::DuplicateLocation(id));
            }
            let position = record.x.zip(record.y);
            locations.push(Location::new(
                id,
                record.name,
                position,
                LocationKind::new(record.kind),
            ));
        }

        let mut connection_ids = HashSet::new();
        let mut connections = Vec::with_capacity(document.connections.len());
        for record in document.connections {
            let connection = Connection::new(ConnectionDraft {
                id: ConnectionId::new(record.id),
                name: record.name,
                distance: record.distance,
                origin: LocationId::new(record.origin_id),
                destination: LocationId::new(record.destination_id),
            })?;
            if !connection_ids.insert(connection.id) {
                return Err(CampusSeedError::DuplicateConnection(connection.id));
            }
            for endpoint in [connection.origin, connection.destination] {
                if !location_ids.contains(&endpoint) {
                    return Err(CampusSeedError::UnknownLocation {
                        connection: connection.id,
                        location: endpoint,
                    });
                }
            }
            connections.push(connection);
        }

        locations.sort_by_key(|location| location.id);
        connections.sort_by_key(|connection| connection.id);
        Ok(Self {
            locations,
            connections,
        })
    }

    /// Locations ordered by id.
    pub fn locations(&self) -> &[Location] {
        &self.locations
    }

    /// Connections ordered by id.
    pub fn connections(&self) -> &[Connection] {
        &self.connections
    }
}

/// Campus graph provider serving a fixed [`CampusSeed`].
#[derive(Debug, Clone, Default)]
pub struct InMemoryCampusGraphRepository {
    seed: CampusSeed,
}

impl InMemoryCampusGraphRepository {
    /// Serve `seed`.
    pub fn new(seed: CampusSeed) -> Self {
        Self { seed }
    }
}

#[async_trait]
impl CampusGraphRepository for InMemoryCampusGraphRepository {
    async fn find_location(
        &self,
        id: LocationId,
    ) -> Result<Option<Location>, CampusGraphRepositoryError> {
        Ok(self
            .seed
            .locations
            .iter()
            .find(|location| location.id == id)
            .cloned())
    }

    async fn list_locations(&self) -> Result<Vec<Location>, CampusGraphRepositoryError> {
        Ok(self.seed.locations.clone())
    }

    async fn list_connections(&self) -> Result<Vec<Connection>, CampusGraphRepositoryError> {
        Ok(self.seed.connections.clone())
    }

    async fn find_locations(
        &self,
        ids: &[LocationId],
    ) -> Result<Vec<Location>, CampusGraphRepositoryError> {
        Ok(self
            .seed
            .locations
            .iter()
            .filter(|location| ids.contains(&location.id))
            .cloned()
            .collect())
    }

    async fn find_connections(
        &self,
        ids: &[ConnectionId],
    ) -> Result<Vec<Connection>, CampusGraphRepositoryError> {
        Ok(self
            .seed
            .connections
            .iter()
            .filter(|connection| ids.contains(&connection.id))
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write as _;

    use rstest::{fixture, rstest};

    use super::*;

    #[fixture]
    fn bundled() -> CampusSeed {
        CampusSeed::from_path(default_seed_path()).expect("bundled seed is valid")
    }

    #[rstest]
    fn bundled_seed_is_sorted_and_complete(bundled: CampusSeed) {
        assert_eq!(bundled.locations().len(), 8);
        assert_eq!(bundled.connections().len(), 8);
        assert!(
            bundled
                .locations()
                .windows(2)
                .all(|pair| pair[0].id < pair[1].id)
        );
    }

    #[rstest]
    fn reads_seed_from_file() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        write!(
            file,
            r#"{{ "locations": [{{ "id": 4, "name": "Hall", "x": null, "y": null, "kind": "building" }}] }}"#
        )
        .expect("write seed");

        let seed = CampusSeed::from_path(file.path()).expect("seed loads");
        assert_eq!(seed.locations()[0].id, LocationId::new(4));
        assert!(seed.connections().is_empty());
    }

    #[rstest]
    fn missing_file_reports_path() {
        let err = CampusSeed::from_path("/nonexistent/campus.json").expect_err("missing file");
        assert!(matches!(err, CampusSeedError::Io { .. }));
    }

    #[rstest]
    #[case(
        r#"{ "locations": [
            { "id": 1, "name": "A", "kind": "building" },
            { "id": 1, "name": "B", "kind": "building" }
        ] }"#,
        "duplicate location id 1"
    )]
    #[case(
        r#"{ "locations": [{ "id": 1, "name": "A", "kind": "building" }],
             "connections": [{ "id": 5, "distance": 1.0, "originId": 1, "destinationId": 9 }] }"#,
        "connection 5 references unknown location 9"
    )]
    #[case(
        r#"{ "locations": [
                { "id": 1, "name": "A", "kind": "building" },
                { "id": 2, "name": "B", "kind": "building" }
             ],
             "connections": [{ "id": 5, "distance": -3.0, "originId": 1, "destinationId": 2 }] }"#,
        "connection 5 has invalid distance -3"
    )]
    fn rejects_invalid_documents(#[case] raw: &str, #[case] message: &str) {
        let err = CampusSeed::from_json_str(raw).expect_err("invalid seed");
        assert_eq!(err.to_string(), message);
    }

    #[rstest]
    #[tokio::test]
    async fn repository_filters_by_id(bundled: CampusSeed) {
        let repo = InMemoryCampusGraphRepository::new(bundled);

        let found = repo
            .find_locations(&[LocationId::new(3), LocationId::new(99)])
            .await
            .expect("lookup");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].kind.as_str(), LocationKind::DEFAULT_CONNECTOR);

        let connections = repo
            .find_connections(&[ConnectionId::new(1), ConnectionId::new(2)])
            .await
            .expect("lookup");
        assert_eq!(connections.len(), 2);
    }
}
