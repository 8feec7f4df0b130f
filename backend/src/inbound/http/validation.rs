//! Extractor configuration turning malformed requests into domain errors.
//!
//! Actix rejects bad query strings and JSON bodies before a handler runs. The
//! handlers registered here re-shape those rejections into the same
//! `{"detail": ...}` envelope used for every other failure.

use actix_web::error::{JsonPayloadError, QueryPayloadError};
use actix_web::{HttpRequest, web};
use tracing::debug;

use crate::domain::Error;

fn json_error_handler(err: JsonPayloadError, req: &HttpRequest) -> actix_web::Error {
    debug!(path = req.path(), error = %err, "rejected request body");
    let message = match &err {
        JsonPayloadError::ContentType => "request body must be application/json".to_owned(),
        JsonPayloadError::Deserialize(inner) => format!("invalid request body: {inner}"),
        other => format!("invalid request body: {other}"),
    };
    Error::invalid_request(message).into()
}

fn query_error_handler(err: QueryPayloadError, req: &HttpRequest) -> actix_web::Error {
    debug!(path = req.path(), error = %err, "rejected query string");
    let message = match &err {
        QueryPayloadError::Deserialize(inner) => format!("invalid query parameters: {inner}"),
        other => format!("invalid query parameters: {other}"),
    };
    Error::invalid_request(message).into()
}

/// JSON extractor configuration for user endpoints.
#[must_use]
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(json_error_handler)
}

/// Query extractor configuration for user endpoints.
#[must_use]
pub fn query_config() -> web::QueryConfig {
    web::QueryConfig::default().error_handler(query_error_handler)
}
