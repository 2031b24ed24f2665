//! HTTP inbound adapter exposing the route endpoints and health probes.

pub mod error;
pub mod health;
pub mod routes;
pub mod routes_dto;
pub mod schemas;
pub mod state;
pub mod validation;

pub use error::ApiResult;
