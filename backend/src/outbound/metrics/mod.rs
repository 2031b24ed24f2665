//! Outbound adapters for metrics exporting.
//!
//! Prometheus-backed implementations of domain metrics ports, compiled only
//! with the `metrics` feature.

mod prometheus_route_metrics;

pub use prometheus_route_metrics::PrometheusRouteMetrics;
