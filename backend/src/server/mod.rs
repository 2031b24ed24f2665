//! Server construction and middleware wiring.

mod config;
mod state_builders;

pub use config::{CampusStore, ServerConfig};

use state_builders::build_http_state;
#[cfg(not(feature = "metrics"))]
use state_builders::noop_route_metrics;
#[cfg(feature = "metrics")]
use state_builders::prometheus_route_metrics;

use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};
#[cfg(feature = "metrics")]
use actix_web_prom::{PrometheusMetrics, PrometheusMetricsBuilder};
use tokio::task::JoinHandle;

use campus_backend::Trace;
#[cfg(debug_assertions)]
use campus_backend::doc::ApiDoc;
use campus_backend::inbound::http::health::{HealthState, live, ready};
use campus_backend::inbound::http::routes::{
    calculate_route, get_cached_route, get_route, save_route,
};
use campus_backend::inbound::http::state::HttpState;
use campus_backend::inbound::http::validation::json_config;
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

fn build_app(
    health_state: web::Data<HealthState>,
    http_state: web::Data<HttpState>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let api = web::scope("/api/v1")
        .service(calculate_route)
        .service(save_route)
        .service(get_cached_route)
        .service(get_route);

    let app = App::new()
        .app_data(health_state)
        .app_data(http_state)
        .app_data(json_config())
        .wrap(Trace)
        .service(api)
        .service(ready)
        .service(live);

    #[cfg(debug_assertions)]
    let app = app.service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));

    app
}

#[cfg(feature = "metrics")]
fn make_metrics() -> std::io::Result<PrometheusMetrics> {
    PrometheusMetricsBuilder::new("campus")
        .endpoint("/metrics")
        .build()
        .map_err(|e| std::io::Error::other(format!("configure Prometheus metrics: {e}")))
}

/// Running server plus the route persistence worker feeding its cache.
pub struct RunningServer {
    pub server: Server,
    pub persistence_worker: JoinHandle<()>,
}

/// Construct an Actix HTTP server using the provided health state and configuration.
///
/// Readiness is flagged once the listener is bound.
///
/// # Errors
/// Propagates [`std::io::Error`] when metrics registration, binding the
/// socket or starting the server fails. The persistence worker is spawned
/// before binding, so callers must be inside a tokio runtime.
pub fn create_server(
    health_state: web::Data<HealthState>,
    config: ServerConfig,
) -> std::io::Result<RunningServer> {
    let server_health_state = health_state.clone();
    #[cfg(feature = "metrics")]
    let prometheus = make_metrics()?;
    #[cfg(feature = "metrics")]
    let route_metrics = prometheus_route_metrics(&prometheus)?;
    #[cfg(not(feature = "metrics"))]
    let route_metrics = noop_route_metrics();

    let (http_state, persistence_worker) = build_http_state(&config, route_metrics);
    let bind_addr = config.bind_addr;

    let server = HttpServer::new(move || {
        let app = build_app(server_health_state.clone(), http_state.clone());

        #[cfg(feature = "metrics")]
        let app = app.wrap(prometheus.clone());

        app
    })
    .bind(bind_addr)?
    .run();

    health_state.mark_ready();
    Ok(RunningServer {
        server,
        persistence_worker,
    })
}
