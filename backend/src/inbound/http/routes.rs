//! Route API handlers.
//!
//! ```text
//! GET  /api/v1/routes/{origin_id}/{destination_id}         Cached or computed route
//! GET  /api/v1/routes/{origin_id}/{destination_id}/cached  Cached route only
//! POST /api/v1/routes/calculate                            Fresh computation
//! POST /api/v1/routes                                      Explicit idempotent save
//! ```

use actix_web::{HttpResponse, get, post, web};

use crate::domain::ports::{RouteRequest, SaveRouteRequest};
use crate::inbound::http::ApiResult;
use crate::inbound::http::routes_dto::{
    CalculateRouteRequest, RoutePath, RouteResponse, SaveRouteRequestBody,
};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, connection_ids, parse_location_id, require};

const ORIGIN_ID: FieldName = FieldName::new("originId");
const DESTINATION_ID: FieldName = FieldName::new("destinationId");
const TOTAL_DISTANCE: FieldName = FieldName::new("totalDistance");
const CONNECTION_IDS: FieldName = FieldName::new("connectionIds");

fn request_from_path(path: &RoutePath) -> ApiResult<RouteRequest> {
    Ok(RouteRequest {
        origin_id: parse_location_id(&path.origin_id, ORIGIN_ID)?,
        destination_id: parse_location_id(&path.destination_id, DESTINATION_ID)?,
    })
}

/// Return the shortest route between two locations.
///
/// Served from the route cache when the pair was computed before; otherwise
/// computed and cached in the background.
#[utoipa::path(
    get,
    path = "/api/v1/routes/{origin_id}/{destination_id}",
    params(
        ("origin_id" = i32, Path, description = "Starting location"),
        ("destination_id" = i32, Path, description = "Target location")
    ),
    responses(
        (status = 200, description = "Route found", body = RouteResponse),
        (status = 400, description = "Invalid or non-routable endpoint", body = crate::inbound::http::schemas::ErrorSchema),
        (status = 404, description = "Unknown location or no path", body = crate::inbound::http::schemas::ErrorSchema),
        (status = 500, description = "Campus graph unavailable", body = crate::inbound::http::schemas::ErrorSchema)
    ),
    tags = ["routes"],
    operation_id = "getRoute"
)]
#[get("/routes/{origin_id}/{destination_id}")]
pub async fn get_route(
    state: web::Data<HttpState>,
    path: web::Path<RoutePath>,
) -> ApiResult<web::Json<RouteResponse>> {
    let request = request_from_path(&path)?;
    let view = state.routes.get_route(request).await?;
    Ok(web::Json(view.into()))
}

/// Return a route only when the pair is already cached.
#[utoipa::path(
    get,
    path = "/api/v1/routes/{origin_id}/{destination_id}/cached",
    params(
        ("origin_id" = i32, Path, description = "Starting location"),
        ("destination_id" = i32, Path, description = "Target location")
    ),
    responses(
        (status = 200, description = "Cached route", body = RouteResponse),
        (status = 400, description = "Invalid or non-routable endpoint", body = crate::inbound::http::schemas::ErrorSchema),
        (status = 404, description = "Unknown location or not cached", body = crate::inbound::http::schemas::ErrorSchema),
        (status = 503, description = "Route cache unavailable", body = crate::inbound::http::schemas::ErrorSchema)
    ),
    tags = ["routes"],
    operation_id = "getCachedRoute"
)]
#[get("/routes/{origin_id}/{destination_id}/cached")]
pub async fn get_cached_route(
    state: web::Data<HttpState>,
    path: web::Path<RoutePath>,
) -> ApiResult<web::Json<RouteResponse>> {
    let request = request_from_path(&path)?;
    let view = state.routes.find_cached(request).await?;
    Ok(web::Json(view.into()))
}

/// Compute a route without reading or writing the route cache.
#[utoipa::path(
    post,
    path = "/api/v1/routes/calculate",
    request_body = CalculateRouteRequest,
    responses(
        (status = 200, description = "Route computed", body = RouteResponse),
        (status = 400, description = "Invalid request", body = crate::inbound::http::schemas::ErrorSchema),
        (status = 404, description = "Unknown location or no path", body = crate::inbound::http::schemas::ErrorSchema),
        (status = 500, description = "Campus graph unavailable", body = crate::inbound::http::schemas::ErrorSchema)
    ),
    tags = ["routes"],
    operation_id = "calculateRoute"
)]
#[post("/routes/calculate")]
pub async fn calculate_route(
    state: web::Data<HttpState>,
    payload: web::Json<CalculateRouteRequest>,
) -> ApiResult<web::Json<RouteResponse>> {
    let CalculateRouteRequest {
        origin_id,
        destination_id,
    } = payload.into_inner();
    let request = RouteRequest::new(
        require(origin_id, ORIGIN_ID)?,
        require(destination_id, DESTINATION_ID)?,
    );
    let view = state.routes.calculate(request).await?;
    Ok(web::Json(view.into()))
}

/// Store a caller-supplied route unless the pair is already cached.
///
/// Returns `201 Created` for a new entry and `200 OK` with the existing
/// entry otherwise.
#[utoipa::path(
    post,
    path = "/api/v1/routes",
    request_body = SaveRouteRequestBody,
    responses(
        (status = 201, description = "Route cached", body = RouteResponse),
        (status = 200, description = "Existing cached route returned", body = RouteResponse),
        (status = 400, description = "Invalid or inconsistent route", body = crate::inbound::http::schemas::ErrorSchema),
        (status = 404, description = "Unknown location", body = crate::inbound::http::schemas::ErrorSchema),
        (status = 503, description = "Route cache unavailable", body = crate::inbound::http::schemas::ErrorSchema)
    ),
    tags = ["routes"],
    operation_id = "saveRoute"
)]
#[post("/routes")]
pub async fn save_route(
    state: web::Data<HttpState>,
    payload: web::Json<SaveRouteRequestBody>,
) -> ApiResult<HttpResponse> {
    let SaveRouteRequestBody {
        origin_id,
        destination_id,
        total_distance,
        connection_ids: raw_connection_ids,
    } = payload.into_inner();
    let request = RouteRequest::new(
        require(origin_id, ORIGIN_ID)?,
        require(destination_id, DESTINATION_ID)?,
    );
    let saved = state
        .routes
        .save_route(SaveRouteRequest {
            origin_id: request.origin_id,
            destination_id: request.destination_id,
            total_distance: require(total_distance, TOTAL_DISTANCE)?,
            connection_ids: connection_ids(require(raw_connection_ids, CONNECTION_IDS)?),
        })
        .await?;

    let body = RouteResponse::from(saved.route);
    if saved.created {
        Ok(HttpResponse::Created().json(body))
    } else {
        Ok(HttpResponse::Ok().json(body))
    }
}

#[cfg(test)]
#[path = "routes_tests.rs"]
mod tests;
