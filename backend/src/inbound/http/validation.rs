//! Shared validation helpers for inbound HTTP adapters.
//!
//! Path segments and body fields arrive loosely typed so malformed input is
//! reported in the error envelope with the offending field, rather than as
//! a bare extractor rejection.

use actix_web::web;
use serde_json::json;

use crate::domain::{ConnectionId, Error, LocationId};

/// Validation error codes for HTTP request failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ErrorCode {
    MissingField,
    InvalidId,
    MalformedBody,
}

impl ErrorCode {
    fn as_str(self) -> &'static str {
        match self {
            ErrorCode::MissingField => "missing_field",
            ErrorCode::InvalidId => "invalid_id",
            ErrorCode::MalformedBody => "malformed_body",
        }
    }
}

/// Newtype wrapper for HTTP field names to provide type safety.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FieldName(&'static str);

impl FieldName {
    pub(crate) const fn new(name: &'static str) -> Self {
        Self(name)
    }

    fn as_str(&self) -> &str {
        self.0
    }
}

fn field_error(field: FieldName, message: String, code: ErrorCode) -> Error {
    Error::invalid_request(message).with_details(json!({
        "field": field.as_str(),
        "code": code.as_str(),
    }))
}

pub(crate) fn missing_field_error(field: FieldName) -> Error {
    let name = field.as_str();
    field_error(
        field,
        format!("missing required field: {name}"),
        ErrorCode::MissingField,
    )
}

pub(crate) fn require<T>(value: Option<T>, field: FieldName) -> Result<T, Error> {
    value.ok_or_else(|| missing_field_error(field))
}

/// Parse a location id path segment.
pub(crate) fn parse_location_id(value: &str, field: FieldName) -> Result<LocationId, Error> {
    value.trim().parse::<i32>().map(LocationId::new).map_err(|_| {
        let name = field.as_str();
        Error::invalid_request(format!("{name} must be an integer location id")).with_details(
            json!({
                "field": name,
                "value": value,
                "code": ErrorCode::InvalidId.as_str(),
            }),
        )
    })
}

pub(crate) fn connection_ids(raw: Vec<i32>) -> Vec<ConnectionId> {
    raw.into_iter().map(ConnectionId::new).collect()
}

/// JSON extractor configuration rendering body errors in the envelope.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| {
        Error::invalid_request(format!("malformed request body: {err}"))
            .with_details(json!({ "code": ErrorCode::MalformedBody.as_str() }))
            .into()
    })
}
