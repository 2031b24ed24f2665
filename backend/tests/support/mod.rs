//! Helpers shared by the database-backed integration suites.
//!
//! Each file under `backend/tests/` builds as its own crate, so suites pull
//! these in with `mod support;`.

pub mod cluster;
pub mod embedded_postgres;

pub use cluster::{handle_cluster_setup_failure, shared_cluster_handle};
pub use embedded_postgres::provision_template_database;

/// Render a `postgres` error with its SQLSTATE and detail.
///
/// `Display` on `postgres::Error` collapses server errors to `db error`.
pub fn format_postgres_error(error: &postgres::Error) -> String {
    let Some(db_error) = error.as_db_error() else {
        return error.to_string();
    };

    let mut summary = format!("postgres error {:?}: {}", db_error.code(), db_error.message());
    if let Some(detail) = db_error.detail() {
        summary.push_str("; detail: ");
        summary.push_str(detail);
    }
    summary
}
