//! Liveness and readiness probes for orchestration and load balancers.
//!
//! Both probes answer with an empty body and `Cache-Control: no-store`;
//! only the status code carries the outcome.

use std::sync::atomic::{AtomicBool, Ordering};

use actix_web::{HttpResponse, get, http::header, web};

/// Probe flags shared between the bootstrap and the probe handlers.
///
/// The server starts live but not ready. Readiness flips once the listener
/// is bound; liveness drops when the process starts draining.
#[derive(Debug, Default)]
pub struct HealthState {
    bound: AtomicBool,
    draining: AtomicBool,
}

impl HealthState {
    /// Fresh state: live, not ready.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record that the listener is bound and routes can be served.
    pub fn mark_ready(&self) {
        self.bound.store(true, Ordering::Release);
    }

    /// Record that shutdown has begun; liveness probes fail from now on.
    pub fn mark_unhealthy(&self) {
        self.draining.store(true, Ordering::Release);
    }

    /// Whether the readiness probe passes.
    pub fn is_ready(&self) -> bool {
        self.bound.load(Ordering::Acquire)
    }

    /// Whether the liveness probe passes.
    pub fn is_alive(&self) -> bool {
        !self.draining.load(Ordering::Acquire)
    }
}

fn probe_status(passing: bool) -> HttpResponse {
    let mut builder = match passing {
        true => HttpResponse::Ok(),
        false => HttpResponse::ServiceUnavailable(),
    };
    builder
        .insert_header((header::CACHE_CONTROL, "no-store"))
        .finish()
}

/// Readiness probe: 200 once the route engine is wired and the listener is
/// bound, 503 before.
#[utoipa::path(
    get,
    path = "/health/ready",
    tags = ["health"],
    responses(
        (status = 200, description = "Route engine accepts traffic"),
        (status = 503, description = "Route engine is still starting")
    )
)]
#[get("/health/ready")]
pub async fn ready(state: web::Data<HealthState>) -> HttpResponse {
    probe_status(state.is_ready())
}

/// Liveness probe: 200 until shutdown begins, 503 afterwards.
#[utoipa::path(
    get,
    path = "/health/live",
    tags = ["health"],
    responses(
        (status = 200, description = "Process is running"),
        (status = 503, description = "Process is draining")
    )
)]
#[get("/health/live")]
pub async fn live(state: web::Data<HealthState>) -> HttpResponse {
    probe_status(state.is_alive())
}
