//! Handler tests against the bundled campus seed.

use std::sync::Arc;

use actix_web::http::StatusCode;
use actix_web::{App, test as actix_test, web};
use rstest::rstest;
use serde_json::{Value, json};

use super::*;
use crate::Trace;
use crate::domain::ports::{FixtureRoutePersistenceQueue, NoOpRouteMetrics};
use crate::domain::{RouteService, RouteServicePorts};
use crate::inbound::http::validation::json_config;
use crate::middleware::TRACE_ID_HEADER;
use crate::outbound::cache::InMemoryRouteCacheRepository;
use crate::outbound::seed::{CampusSeed, InMemoryCampusGraphRepository, default_seed_path};

fn test_app() -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let seed = CampusSeed::from_path(default_seed_path()).expect("bundled seed");
    let service = RouteService::new(RouteServicePorts {
        graph: Arc::new(InMemoryCampusGraphRepository::new(seed)),
        cache: Arc::new(InMemoryRouteCacheRepository::new()),
        queue: Arc::new(FixtureRoutePersistenceQueue),
        metrics: Arc::new(NoOpRouteMetrics),
    });
    App::new()
        .app_data(web::Data::new(HttpState::new(Arc::new(service))))
        .app_data(json_config())
        .wrap(Trace)
        .service(
            web::scope("/api/v1")
                .service(calculate_route)
                .service(save_route)
                .service(get_cached_route)
                .service(get_route),
        )
}

fn location_ids(body: &Value) -> Vec<i64> {
    body["data"]["locations"]
        .as_array()
        .expect("locations array")
        .iter()
        .filter_map(|location| location["id"].as_i64())
        .collect()
}

#[actix_web::test]
async fn get_route_computes_shortest_path_through_connectors() {
    let app = actix_test::init_service(test_app()).await;

    let request = actix_test::TestRequest::get()
        .uri("/api/v1/routes/1/4")
        .to_request();
    let response = actix_test::call_service(&app, request).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["cached"], false);
    assert_eq!(location_ids(&body), vec![1, 3, 2, 6, 4]);
    assert_eq!(body["data"]["totalDistance"], 150.0);
    assert_eq!(
        body["data"]["connections"]
            .as_array()
            .expect("connections array")
            .len(),
        4
    );
}

#[rstest]
#[case("/api/v1/routes/3/2", StatusCode::BAD_REQUEST, "invalid_request")]
#[case("/api/v1/routes/2/2", StatusCode::BAD_REQUEST, "invalid_request")]
#[case("/api/v1/routes/library/2", StatusCode::BAD_REQUEST, "invalid_request")]
#[case("/api/v1/routes/1/99", StatusCode::NOT_FOUND, "not_found")]
#[case("/api/v1/routes/1/8", StatusCode::NOT_FOUND, "not_found")]
#[actix_web::test]
async fn get_route_reports_failures_in_envelope(
    #[case] uri: &str,
    #[case] status: StatusCode,
    #[case] code: &str,
) {
    let app = actix_test::init_service(test_app()).await;

    let request = actix_test::TestRequest::get().uri(uri).to_request();
    let response = actix_test::call_service(&app, request).await;
    assert_eq!(response.status(), status);
    let header = response
        .headers()
        .get(TRACE_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(str::to_owned)
        .expect("trace id header");

    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body["success"], false);
    assert_eq!(body["code"], code);
    assert_eq!(body["traceId"].as_str(), Some(header.as_str()));
}

#[actix_web::test]
async fn connector_rejection_names_the_endpoint() {
    let app = actix_test::init_service(test_app()).await;

    let request = actix_test::TestRequest::get()
        .uri("/api/v1/routes/1/6")
        .to_request();
    let body: Value = actix_test::call_and_read_body_json(&app, request).await;

    assert_eq!(body["details"], json!({"endpoint": "destination"}));
}

#[actix_web::test]
async fn cached_lookup_misses_until_route_is_saved() {
    let app = actix_test::init_service(test_app()).await;

    let miss = actix_test::TestRequest::get()
        .uri("/api/v1/routes/1/2/cached")
        .to_request();
    let response = actix_test::call_service(&app, miss).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let save_body = json!({
        "originId": 1,
        "destinationId": 2,
        "totalDistance": 85.0,
        "connectionIds": [1, 2]
    });
    let save = actix_test::TestRequest::post()
        .uri("/api/v1/routes")
        .set_json(&save_body)
        .to_request();
    let response = actix_test::call_service(&app, save).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body["cached"], false);

    let hit = actix_test::TestRequest::get()
        .uri("/api/v1/routes/2/1/cached")
        .to_request();
    let response = actix_test::call_service(&app, hit).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body["cached"], true);
    assert_eq!(location_ids(&body), vec![1, 3, 2]);

    let again = actix_test::TestRequest::post()
        .uri("/api/v1/routes")
        .set_json(&save_body)
        .to_request();
    let response = actix_test::call_service(&app, again).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body["cached"], true);
}

#[actix_web::test]
async fn save_rejects_connections_that_do_not_chain() {
    let app = actix_test::init_service(test_app()).await;

    let request = actix_test::TestRequest::post()
        .uri("/api/v1/routes")
        .set_json(json!({
            "originId": 1,
            "destinationId": 4,
            "totalDistance": 65.0,
            "connectionIds": [4, 6]
        }))
        .to_request();
    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = actix_test::read_body_json(response).await;
    assert!(
        body["message"]
            .as_str()
            .is_some_and(|message| message.starts_with("connections do not form a route"))
    );
}

#[actix_web::test]
async fn calculate_returns_fresh_route() {
    let app = actix_test::init_service(test_app()).await;

    let request = actix_test::TestRequest::post()
        .uri("/api/v1/routes/calculate")
        .set_json(json!({ "originId": 7, "destinationId": 1 }))
        .to_request();
    let response = actix_test::call_service(&app, request).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body["cached"], false);
    assert_eq!(location_ids(&body), vec![7, 6, 2, 3, 1]);
    assert_eq!(body["data"]["totalDistance"], 127.0);
}

#[rstest]
#[case(json!({ "originId": 1 }), "missing required field: destinationId")]
#[case(json!({ "destinationId": 1 }), "missing required field: originId")]
#[actix_web::test]
async fn calculate_requires_both_ids(#[case] payload: Value, #[case] message: &str) {
    let app = actix_test::init_service(test_app()).await;

    let request = actix_test::TestRequest::post()
        .uri("/api/v1/routes/calculate")
        .set_json(payload)
        .to_request();
    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body["message"], message);
}

#[actix_web::test]
async fn malformed_body_uses_error_envelope() {
    let app = actix_test::init_service(test_app()).await;

    let request = actix_test::TestRequest::post()
        .uri("/api/v1/routes/calculate")
        .insert_header(("content-type", "application/json"))
        .set_payload("{ not json")
        .to_request();
    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body["success"], false);
    assert_eq!(body["details"]["code"], "malformed_body");
}
