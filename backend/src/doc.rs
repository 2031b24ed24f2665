//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers the route endpoints, the health probes and the
//! error envelope schemas. The document backs Swagger UI in debug builds and
//! is exported by `cargo run --bin openapi-dump`.

use utoipa::OpenApi;

use crate::inbound::http::routes_dto::{
    CalculateRouteRequest, ConnectionResponse, LocationResponse, RouteData, RouteResponse,
    SaveRouteRequestBody,
};
use crate::inbound::http::schemas::{ErrorCodeSchema, ErrorSchema};

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Campus navigation API",
        description = "Shortest walking routes between campus locations, with a persistent route cache."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::routes::get_route,
        crate::inbound::http::routes::get_cached_route,
        crate::inbound::http::routes::calculate_route,
        crate::inbound::http::routes::save_route,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        RouteResponse,
        RouteData,
        LocationResponse,
        ConnectionResponse,
        CalculateRouteRequest,
        SaveRouteRequestBody,
        ErrorSchema,
        ErrorCodeSchema
    )),
    tags(
        (name = "routes", description = "Shortest-path lookups and the route cache"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
