//! PostgreSQL-backed `RouteCacheRepository` implementation using Diesel ORM.
//!
//! One row in `routes` per unordered endpoint pair, enforced by the
//! `routes_unordered_pair_idx` expression index. Legs live in
//! `route_connections` keyed by position. A save that loses the race for a
//! pair returns the winner's row.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::{AsyncPgConnection, RunQueryDsl};

use crate::domain::ports::{RouteCacheRepository, RouteCacheRepositoryError};
use crate::domain::{CachedRoute, ConnectionId, LocationId, NewRoute, RouteId, RouteLeg, SavedRoute};

use super::diesel_basic_error_mapping::{map_basic_diesel_error, map_basic_pool_error};
use super::models::{NewRouteRow, RouteConnectionRow, RouteRow};
use super::pool::{DbPool, PoolError};
use super::schema::{route_connections, routes};

/// Diesel-backed implementation of the route cache repository port.
#[derive(Clone)]
pub struct DieselRouteCacheRepository {
    pool: DbPool,
}

impl DieselRouteCacheRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> RouteCacheRepositoryError {
    map_basic_pool_error(error, |message| {
        RouteCacheRepositoryError::connection(message)
    })
}

fn map_diesel_error(error: diesel::result::Error) -> RouteCacheRepositoryError {
    map_basic_diesel_error(
        error,
        RouteCacheRepositoryError::query,
        RouteCacheRepositoryError::connection,
    )
}

fn row_to_cached_route(route: RouteRow, legs: Vec<RouteConnectionRow>) -> CachedRoute {
    CachedRoute {
        id: RouteId::new(route.id),
        origin: LocationId::new(route.origin_id),
        destination: LocationId::new(route.destination_id),
        total_distance: route.total_distance,
        legs: legs
            .into_iter()
            .map(|leg| RouteLeg {
                connection: ConnectionId::new(leg.connection_id),
                position: leg.position,
            })
            .collect(),
        created_at: route.created_at,
    }
}

fn leg_rows(route_id: i32, route: &NewRoute) -> Vec<RouteConnectionRow> {
    route
        .legs()
        .into_iter()
        .map(|leg| RouteConnectionRow {
            route_id,
            connection_id: leg.connection.get(),
            position: leg.position,
        })
        .collect()
}

async fn find_route_row(
    conn: &mut AsyncPgConnection,
    a: LocationId,
    b: LocationId,
) -> Result<Option<RouteRow>, diesel::result::Error> {
    let (a, b) = (a.get(), b.get());
    routes::table
        .filter(
            routes::origin_id
                .eq(a)
                .and(routes::destination_id.eq(b))
                .or(routes::origin_id.eq(b).and(routes::destination_id.eq(a))),
        )
        .select(RouteRow::as_select())
        .first::<RouteRow>(conn)
        .await
        .optional()
}

async fn load_legs(
    conn: &mut AsyncPgConnection,
    route_id: i32,
) -> Result<Vec<RouteConnectionRow>, diesel::result::Error> {
    route_connections::table
        .filter(route_connections::route_id.eq(route_id))
        .order(route_connections::position.asc())
        .select(RouteConnectionRow::as_select())
        .load(conn)
        .await
}

#[async_trait]
impl RouteCacheRepository for DieselRouteCacheRepository {
    async fn find(
        &self,
        origin: LocationId,
        destination: LocationId,
    ) -> Result<Option<CachedRoute>, RouteCacheRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let Some(route) = find_route_row(&mut conn, origin, destination)
            .await
            .map_err(map_diesel_error)?
        else {
            return Ok(None);
        };
        let legs = load_legs(&mut conn, route.id)
            .await
            .map_err(map_diesel_error)?;

        Ok(Some(row_to_cached_route(route, legs)))
    }

    async fn save(&self, route: &NewRoute) -> Result<SavedRoute, RouteCacheRepositoryError> {
        use diesel_async::AsyncConnection as _;
        use diesel_async::scoped_futures::ScopedFutureExt as _;

        let new_row = NewRouteRow {
            origin_id: route.origin.get(),
            destination_id: route.destination.get(),
            total_distance: route.total_distance,
        };
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        // Header and legs commit together so readers never see a route
        // without its connections.
        conn.transaction::<_, diesel::result::Error, _>(|conn| {
            async move {
                let inserted = diesel::insert_into(routes::table)
                    .values(&new_row)
                    .on_conflict_do_nothing()
                    .returning(RouteRow::as_returning())
                    .get_result::<RouteRow>(conn)
                    .await
                    .optional()?;

                if let Some(row) = inserted {
                    let legs = leg_rows(row.id, route);
                    if !legs.is_empty() {
                        diesel::insert_into(route_connections::table)
                            .values(&legs)
                            .execute(conn)
                            .await?;
                    }
                    return Ok(SavedRoute {
                        route: row_to_cached_route(row, legs),
                        created: true,
                    });
                }

                let existing = find_route_row(conn, route.origin, route.destination)
                    .await?
                    .ok_or(diesel::result::Error::NotFound)?;
                let legs = load_legs(conn, existing.id).await?;
                Ok(SavedRoute {
                    route: row_to_cached_route(existing, legs),
                    created: false,
                })
            }
            .scope_boxed()
        })
        .await
        .map_err(map_diesel_error)
    }
}
