//! Tests for the server bootstrap, covering readiness signalling and the
//! wiring between the route API and the campus store.

use std::net::SocketAddr;

use actix_web::web;
use rstest::{fixture, rstest};

use super::server::{CampusStore, RunningServer, ServerConfig, create_server};
use campus_backend::inbound::http::health::HealthState;
use campus_backend::outbound::seed::{CampusSeed, default_seed_path};

#[fixture]
fn health_state() -> web::Data<HealthState> {
    web::Data::new(HealthState::new())
}

#[fixture]
fn seed_config() -> ServerConfig {
    let seed = CampusSeed::from_path(default_seed_path()).expect("bundled seed loads");
    let bind_addr: SocketAddr = "127.0.0.1:0".parse().expect("loopback address");
    ServerConfig::new(bind_addr, CampusStore::Seed(seed)).with_queue_capacity(4)
}

#[rstest]
#[actix_rt::test]
async fn create_server_marks_ready(health_state: web::Data<HealthState>, seed_config: ServerConfig) {
    assert!(!health_state.is_ready(), "state should start unready");

    let RunningServer {
        server,
        persistence_worker,
    } = create_server(health_state.clone(), seed_config).expect("server should build");

    assert!(
        health_state.is_ready(),
        "server creation should mark readiness"
    );
    drop(server);
    persistence_worker.abort();
}

#[rstest]
#[actix_rt::test]
async fn create_server_rejects_unbindable_address(health_state: web::Data<HealthState>) {
    let occupied = std::net::TcpListener::bind("127.0.0.1:0").expect("reserve port");
    let bind_addr = occupied.local_addr().expect("reserved address");
    let seed = CampusSeed::from_path(default_seed_path()).expect("bundled seed loads");

    let result = create_server(
        health_state.clone(),
        ServerConfig::new(bind_addr, CampusStore::Seed(seed)),
    );

    assert!(result.is_err(), "binding an occupied port should fail");
    assert!(!health_state.is_ready(), "failed bind must not flag readiness");
}
