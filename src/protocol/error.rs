//! Protocol error envelopes and the HTTP status mapping table.
//!
//! # Design Decisions
//! - Backend-declared errors pass through unchanged (code and message
//!   preserved exactly); the gateway is transparent for them
//! - Gateway-detected faults collapse to the single generic
//!   `system.internalError` code so internal detail never reaches clients
//! - Unknown codes map to 500; guessing a friendlier status would invent
//!   semantics the backend never declared

use axum::http::StatusCode;
use serde::{Deserialize, Serialize};
use serde_json::value::RawValue;

pub const CODE_ACCESS_DENIED: &str = "system.accessDenied";
pub const CODE_FORBIDDEN_ORIGIN: &str = "system.forbiddenOrigin";
pub const CODE_INTERNAL_ERROR: &str = "system.internalError";
pub const CODE_INVALID_PARAMS: &str = "system.invalidParams";
pub const CODE_METHOD_NOT_FOUND: &str = "system.methodNotFound";
pub const CODE_NOT_FOUND: &str = "system.notFound";
pub const CODE_TIMEOUT: &str = "system.timeout";

/// A protocol error: a dotted code, a human-readable message, and optional
/// backend-defined data forwarded opaquely.
///
/// Serializes to the error envelope's inner object and doubles as the HTTP
/// error body.
#[derive(Debug, Clone, Serialize, Deserialize, thiserror::Error)]
#[error("{code}: {message}")]
pub struct ResError {
    pub code: String,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Box<RawValue>>,
}

impl ResError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            data: None,
        }
    }

    pub fn access_denied() -> Self {
        Self::new(CODE_ACCESS_DENIED, "Access denied")
    }

    pub fn forbidden_origin() -> Self {
        Self::new(CODE_FORBIDDEN_ORIGIN, "Forbidden origin")
    }

    pub fn internal_error() -> Self {
        Self::new(CODE_INTERNAL_ERROR, "Internal error")
    }

    pub fn invalid_params() -> Self {
        Self::new(CODE_INVALID_PARAMS, "Invalid parameters")
    }

    pub fn not_found() -> Self {
        Self::new(CODE_NOT_FOUND, "Not found")
    }

    pub fn timeout() -> Self {
        Self::new(CODE_TIMEOUT, "Request timeout")
    }

    /// The HTTP status this error is surfaced with.
    ///
    /// Timeouts deliberately share 404 with not-found; distinguishing them
    /// would reveal which backends exist but fail to answer.
    pub fn status(&self) -> StatusCode {
        match self.code.as_str() {
            CODE_INVALID_PARAMS => StatusCode::BAD_REQUEST,
            CODE_ACCESS_DENIED => StatusCode::UNAUTHORIZED,
            CODE_FORBIDDEN_ORIGIN => StatusCode::FORBIDDEN,
            CODE_NOT_FOUND | CODE_TIMEOUT | CODE_METHOD_NOT_FOUND => StatusCode::NOT_FOUND,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}
