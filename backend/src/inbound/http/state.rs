//! Shared HTTP adapter state.
//!
//! Handlers accept this state via `actix_web::web::Data` so they only depend
//! on the [`RouteQuery`] driving port and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{FixtureRouteQuery, RouteQuery};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub routes: Arc<dyn RouteQuery>,
}

impl HttpState {
    /// Construct state around a route query implementation.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use campus_backend::domain::ports::FixtureRouteQuery;
    /// use campus_backend::inbound::http::state::HttpState;
    ///
    /// let state = HttpState::new(Arc::new(FixtureRouteQuery));
    /// let _routes = state.routes.clone();
    /// ```
    pub fn new(routes: Arc<dyn RouteQuery>) -> Self {
        Self { routes }
    }
}

impl Default for HttpState {
    fn default() -> Self {
        Self::new(Arc::new(FixtureRouteQuery))
    }
}
