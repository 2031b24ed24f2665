//! Backend entry-point: loads settings, prepares the campus store and
//! serves the route API.

mod server;
#[cfg(test)]
mod tests;

use std::time::Duration;

use actix_web::web;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use campus_backend::inbound::http::health::HealthState;
use campus_backend::outbound::persistence::{DbPool, PoolConfig, run_migrations};
use campus_backend::outbound::seed::CampusSeed;
use campus_backend::settings::ServerSettings;
use ortho_config::OrthoConfig as _;
use server::{CampusStore, RunningServer, ServerConfig, create_server};

const WORKER_DRAIN_TIMEOUT: Duration = Duration::from_secs(5);

async fn load_store(settings: &ServerSettings) -> std::io::Result<CampusStore> {
    match settings.database_url() {
        Some(database_url) => {
            let applied = run_migrations(database_url)
                .await
                .map_err(std::io::Error::other)?;
            info!(applied, "database schema up to date");
            let pool = DbPool::new(PoolConfig::new(database_url))
                .await
                .map_err(std::io::Error::other)?;
            Ok(CampusStore::Database(pool))
        }
        None => {
            let path = settings.seed_path();
            let seed = CampusSeed::from_path(&path).map_err(std::io::Error::other)?;
            info!(path = %path.display(), "loaded campus seed");
            Ok(CampusStore::Seed(seed))
        }
    }
}

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = ServerSettings::load()
        .map_err(|e| std::io::Error::other(format!("failed to load settings: {e}")))?;
    let bind_addr = settings
        .bind_addr()
        .map_err(|e| std::io::Error::other(format!("invalid bind address: {e}")))?;
    let store = load_store(&settings).await?;
    let config = ServerConfig::new(bind_addr, store)
        .with_connector_kind(settings.connector_kind())
        .with_queue_capacity(settings.persistence_queue_capacity());

    let health_state = web::Data::new(HealthState::new());
    let RunningServer {
        server,
        persistence_worker,
    } = create_server(health_state.clone(), config)?;
    info!(%bind_addr, "campus route server listening");

    let result = server.await;
    health_state.mark_unhealthy();
    match tokio::time::timeout(WORKER_DRAIN_TIMEOUT, persistence_worker).await {
        Ok(Ok(())) => info!("route persistence worker drained"),
        Ok(Err(e)) => warn!(error = %e, "route persistence worker ended abnormally"),
        Err(_) => warn!("route persistence worker still busy at shutdown; pending routes dropped"),
    }
    result
}
