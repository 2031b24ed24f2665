//! Prometheus adapter for route cache outcome counters.

use async_trait::async_trait;
use prometheus::{CounterVec, Opts, Registry};

use crate::domain::ports::{RouteMetrics, RouteMetricsError};

/// Prometheus-backed route cache metrics.
///
/// # Metric Specification
///
/// - **Name**: `campus_route_cache_requests_total`
/// - **Type**: Counter
/// - **Labels**: `outcome` (`hit` or `miss`)
pub struct PrometheusRouteMetrics {
    requests_total: CounterVec,
}

impl PrometheusRouteMetrics {
    /// Create and register the counter with `registry`.
    ///
    /// # Errors
    ///
    /// Returns an error if a metric with the same name is already registered.
    pub fn new(registry: &Registry) -> Result<Self, prometheus::Error> {
        let requests_total = CounterVec::new(
            Opts::new(
                "campus_route_cache_requests_total",
                "Route lookups by cache outcome",
            ),
            &["outcome"],
        )?;
        registry.register(Box::new(requests_total.clone()))?;
        Ok(Self { requests_total })
    }

    fn record(&self, outcome: &str) {
        self.requests_total.with_label_values(&[outcome]).inc();
    }
}

#[async_trait]
impl RouteMetrics for PrometheusRouteMetrics {
    async fn record_cache_hit(&self) -> Result<(), RouteMetricsError> {
        self.record("hit");
        Ok(())
    }

    async fn record_cache_miss(&self) -> Result<(), RouteMetricsError> {
        self.record("miss");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn second_registration_fails() {
        let registry = Registry::new();
        PrometheusRouteMetrics::new(&registry).expect("first registration");
        assert!(PrometheusRouteMetrics::new(&registry).is_err());
    }

    #[rstest]
    #[tokio::test]
    async fn hits_and_misses_use_separate_labels() {
        let registry = Registry::new();
        let metrics = PrometheusRouteMetrics::new(&registry).expect("registration");

        metrics.record_cache_hit().await.expect("hit recorded");
        metrics.record_cache_hit().await.expect("hit recorded");
        metrics.record_cache_miss().await.expect("miss recorded");

        let value = |outcome: &str| metrics.requests_total.with_label_values(&[outcome]).get();
        assert_eq!(value("hit"), 2.0);
        assert_eq!(value("miss"), 1.0);
        assert!(
            registry
                .gather()
                .iter()
                .any(|family| family.name() == "campus_route_cache_requests_total")
        );
    }
}
