//! Domain port surface for recording route cache hit/miss metrics.
//!
//! Recording failures never affect a route response; callers log them and
//! move on.

use async_trait::async_trait;

use super::define_port_error;

define_port_error! {
    /// Errors exposed when recording metrics.
    pub enum RouteMetricsError {
        /// Metric exporter rejected the write.
        Export { message: String } => "route metrics exporter failed: {message}",
    }
}

/// Cache outcome counters.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RouteMetrics: Send + Sync {
    /// Record a lookup served from the route cache.
    async fn record_cache_hit(&self) -> Result<(), RouteMetricsError>;

    /// Record a lookup that found nothing usable in the route cache.
    async fn record_cache_miss(&self) -> Result<(), RouteMetricsError>;
}

/// Metrics sink used when the `metrics` feature is off and in tests.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoOpRouteMetrics;

#[async_trait]
impl RouteMetrics for NoOpRouteMetrics {
    async fn record_cache_hit(&self) -> Result<(), RouteMetricsError> {
        Ok(())
    }

    async fn record_cache_miss(&self) -> Result<(), RouteMetricsError> {
        Ok(())
    }
}
