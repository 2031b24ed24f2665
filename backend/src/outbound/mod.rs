//! Outbound adapters implementing domain ports for external infrastructure.
//!
//! - **persistence**: PostgreSQL-backed campus graph and route cache
//! - **seed**: JSON campus snapshot served from memory
//! - **cache**: in-process route cache for database-less runs
//! - **queue**: tokio channel feeding the route persistence worker
//! - **metrics**: Prometheus cache counters (feature-gated)
//!
//! Adapters are thin translators between domain types and infrastructure
//! representations. They contain no routing logic.

pub mod cache;
#[cfg(feature = "metrics")]
pub mod metrics;
pub mod persistence;
pub mod queue;
pub mod seed;
