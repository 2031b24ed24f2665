//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! Concrete implementations of the campus graph and route cache ports
//! backed by PostgreSQL via `diesel-async` and `bb8` connection pooling.
//!
//! # Architecture
//!
//! - **Thin adapters**: repositories only translate between Diesel rows and
//!   domain types. Route computation stays in the domain.
//! - **Internal models**: row structs (`models.rs`) and table definitions
//!   (`schema.rs`) never leave this module.
//! - **Strongly typed errors**: database and pool failures map onto each
//!   port's `Connection` and `Query` variants.
//!
//! # Example
//!
//! ```ignore
//! use campus_backend::outbound::persistence::{
//!     DbPool, DieselCampusGraphRepository, PoolConfig, run_migrations,
//! };
//!
//! run_migrations("postgres://localhost/campus").await?;
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/campus")).await?;
//! let graph = DieselCampusGraphRepository::new(pool);
//! ```

mod diesel_basic_error_mapping;
mod diesel_campus_graph_repository;
mod diesel_route_cache_repository;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_campus_graph_repository::DieselCampusGraphRepository;
pub use diesel_route_cache_repository::DieselRouteCacheRepository;
pub use migrations::{MigrationError, run_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};
