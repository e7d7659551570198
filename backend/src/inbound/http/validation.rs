//! Shared validation helpers for inbound HTTP adapters.
//!
//! Every malformed input becomes an `invalid_request` error whose details
//! name the offending field and a stable code.

use actix_web::error::{JsonPayloadError, PathError};
use actix_web::{HttpRequest, web};
use serde_json::json;
use tracing::debug;

use crate::domain::{Error, MatchRequestId, UserId};

/// Validation error codes for HTTP request failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ValidationCode {
    MissingField,
    InvalidId,
    MalformedBody,
}

impl ValidationCode {
    fn as_str(self) -> &'static str {
        match self {
            Self::MissingField => "missing_field",
            Self::InvalidId => "invalid_id",
            Self::MalformedBody => "malformed_body",
        }
    }
}

fn field_error(field: &str, message: String, code: ValidationCode) -> Error {
    Error::invalid_request(message).with_details(json!({
        "field": field,
        "code": code.as_str(),
    }))
}

pub(crate) fn missing_field_error(field: &'static str) -> Error {
    field_error(
        field,
        format!("missing required field: {field}"),
        ValidationCode::MissingField,
    )
}

/// Unwrap an optional payload field or report it as missing.
pub(crate) fn require<T>(value: Option<T>, field: &'static str) -> Result<T, Error> {
    value.ok_or_else(|| missing_field_error(field))
}

pub(crate) fn invalid_id_error(field: &'static str) -> Error {
    field_error(
        field,
        format!("{field} must be a positive integer"),
        ValidationCode::InvalidId,
    )
}

/// Validate a user id carried in a request body.
pub(crate) fn parse_user_id(raw: i64, field: &'static str) -> Result<UserId, Error> {
    UserId::new(raw).map_err(|_| invalid_id_error(field))
}

/// Validate a match request id taken from the URL path.
pub(crate) fn parse_match_request_id(raw: &str) -> Result<MatchRequestId, Error> {
    raw.trim()
        .parse::<i64>()
        .ok()
        .and_then(|id| MatchRequestId::new(id).ok())
        .ok_or_else(|| invalid_id_error("id"))
}

/// Render body deserialisation failures in the domain error format.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err: JsonPayloadError, _req: &HttpRequest| {
        debug!(error = %err, "rejected malformed JSON body");
        Error::invalid_request(format!("malformed request body: {err}"))
            .with_details(json!({ "code": ValidationCode::MalformedBody.as_str() }))
            .into()
    })
}

/// Render path extraction failures in the domain error format.
pub fn path_config() -> web::PathConfig {
    web::PathConfig::default().error_handler(|err: PathError, _req: &HttpRequest| {
        debug!(error = %err, "rejected malformed path");
        invalid_id_error("id").into()
    })
}
