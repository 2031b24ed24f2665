//! Campus navigation backend.
//!
//! Shortest walking routes between campus locations over an undirected
//! weighted graph, with a persistent cache of computed routes.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod settings;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use domain::TraceId;
pub use middleware::Trace;
