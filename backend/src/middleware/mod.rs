//! Request middleware.
//!
//! Purpose: request lifecycle concerns shared by every handler, currently
//! trace identifier assignment.

pub mod trace;

pub use trace::{TRACE_ID_HEADER, Trace};
