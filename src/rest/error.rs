//! Status-code and body constructors for endpoint failures.

use super::endpoints::ApiReply;
use serde_json::json;
use std::fmt;

/// 400 reply for a payload that failed shape or field validation.
pub(crate) fn validation_failed(detail: &impl fmt::Display) -> ApiReply {
    ApiReply::bad_request(json!({
        "status": "Validation failed",
        "detail": detail.to_string(),
    }))
}

/// 400 reply for an action payload referencing a record that does not exist.
pub(crate) fn invalid_reference(message: &str) -> ApiReply {
    ApiReply::bad_request(json!({ "status": message }))
}

/// 404 reply for a detail route addressing a record that does not exist.
pub(crate) fn not_found() -> ApiReply {
    ApiReply::with_body(404, json!({ "detail": "Not found." }))
}

/// 500 reply for a store failure the endpoint cannot express otherwise.
pub(crate) fn server_error() -> ApiReply {
    ApiReply::with_body(500, json!({ "status": "Internal error" }))
}
