//! PostgreSQL-backed `CampusGraphRepository` implementation using Diesel ORM.
//!
//! Locations and connections are loaded in id order so the shortest-path
//! tie-break is stable across restarts. Rows pass through the validated
//! domain constructors; a row that fails validation is a query error.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{CampusGraphRepository, CampusGraphRepositoryError};
use crate::domain::{
    Connection, ConnectionDraft, ConnectionId, Location, LocationId, LocationKind,
};

use super::diesel_basic_error_mapping::{map_basic_diesel_error, map_basic_pool_error};
use super::models::{ConnectionRow, LocationRow};
use super::pool::{DbPool, PoolError};
use super::schema::{connections, locations};

/// Diesel-backed implementation of the campus graph repository port.
#[derive(Clone)]
pub struct DieselCampusGraphRepository {
    pool: DbPool,
}

impl DieselCampusGraphRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> CampusGraphRepositoryError {
    map_basic_pool_error(error, |message| {
        CampusGraphRepositoryError::connection(message)
    })
}

fn map_diesel_error(error: diesel::result::Error) -> CampusGraphRepositoryError {
    map_basic_diesel_error(
        error,
        CampusGraphRepositoryError::query,
        CampusGraphRepositoryError::connection,
    )
}

fn row_to_location(row: LocationRow) -> Location {
    let LocationRow {
        id,
        name,
        x_coord,
        y_coord,
        kind,
    } = row;
    Location::new(
        LocationId::new(id),
        name,
        x_coord.zip(y_coord),
        LocationKind::new(kind),
    )
}

fn row_to_connection(row: ConnectionRow) -> Result<Connection, CampusGraphRepositoryError> {
    Connection::new(ConnectionDraft {
        id: ConnectionId::new(row.id),
        name: row.name,
        distance: row.distance,
        origin: LocationId::new(row.origin_id),
        destination: LocationId::new(row.destination_id),
    })
    .map_err(|err| CampusGraphRepositoryError::query(err.to_string()))
}

fn rows_to_connections(
    rows: Vec<ConnectionRow>,
) -> Result<Vec<Connection>, CampusGraphRepositoryError> {
    rows.into_iter().map(row_to_connection).collect()
}

#[async_trait]
impl CampusGraphRepository for DieselCampusGraphRepository {
    async fn find_location(
        &self,
        id: LocationId,
    ) -> Result<Option<Location>, CampusGraphRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row = locations::table
            .filter(locations::id.eq(id.get()))
            .select(LocationRow::as_select())
            .first::<LocationRow>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        Ok(row.map(row_to_location))
    }

    async fn list_locations(&self) -> Result<Vec<Location>, CampusGraphRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<LocationRow> = locations::table
            .order(locations::id.asc())
            .select(LocationRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(rows.into_iter().map(row_to_location).collect())
    }

    async fn list_connections(&self) -> Result<Vec<Connection>, CampusGraphRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<ConnectionRow> = connections::table
            .order(connections::id.asc())
            .select(ConnectionRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        rows_to_connections(rows)
    }

    async fn find_locations(
        &self,
        ids: &[LocationId],
    ) -> Result<Vec<Location>, CampusGraphRepositoryError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let raw_ids: Vec<i32> = ids.iter().map(|id| id.get()).collect();

        let rows: Vec<LocationRow> = locations::table
            .filter(locations::id.eq_any(&raw_ids))
            .order(locations::id.asc())
            .select(LocationRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(rows.into_iter().map(row_to_location).collect())
    }

    async fn find_connections(
        &self,
        ids: &[ConnectionId],
    ) -> Result<Vec<Connection>, CampusGraphRepositoryError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let raw_ids: Vec<i32> = ids.iter().map(|id| id.get()).collect();

        let rows: Vec<ConnectionRow> = connections::table
            .filter(connections::id.eq_any(&raw_ids))
            .order(connections::id.asc())
            .select(ConnectionRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        rows_to_connections(rows)
    }
}
