//! Response composition.
//!
//! # Responsibilities
//! - Map terminal pipeline outcomes to HTTP status, headers and body
//! - Attach the request's CORS headers to every response, success or failure
//!
//! # Design Decisions
//! - Resource references answer 200 with an empty body and a `Location`
//!   header built from the rid; the href round-trips through the path
//!   parser
//! - Error bodies are the serialized error object itself, so backend-coded
//!   errors reach clients byte-for-byte

use axum::{
    body::Body,
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};
use serde_json::value::RawValue;

use crate::protocol::{CallOutcome, ResError};
use crate::security::OriginDecision;

/// Compose an error response: mapped status, JSON error body.
pub fn error(err: &ResError, origin: &OriginDecision) -> Response {
    let body = serde_json::to_vec(err).unwrap_or_default();
    let response = (
        err.status(),
        [(header::CONTENT_TYPE, HeaderValue::from_static("application/json"))],
        body,
    )
        .into_response();
    with_origin(response, origin)
}

/// Compose a 200 response carrying a plain JSON result verbatim.
pub fn result(raw: &RawValue, origin: &OriginDecision) -> Response {
    let response = (
        StatusCode::OK,
        [(header::CONTENT_TYPE, HeaderValue::from_static("application/json"))],
        raw.get().as_bytes().to_vec(),
    )
        .into_response();
    with_origin(response, origin)
}

/// Compose a 204 response for an empty call reply.
pub fn no_content(origin: &OriginDecision) -> Response {
    with_origin(StatusCode::NO_CONTENT.into_response(), origin)
}

/// Compose a 200 response referencing a resource by `Location`, empty body.
pub fn resource_ref(href: &str, origin: &OriginDecision) -> Response {
    let response = match HeaderValue::from_str(href) {
        Ok(location) => (StatusCode::OK, [(header::LOCATION, location)], Body::empty())
            .into_response(),
        // Unrepresentable hrefs cannot occur for validated rids; treat as a
        // gateway fault if they somehow do.
        Err(_) => return error(&ResError::internal_error(), origin),
    };
    with_origin(response, origin)
}

/// Compose the response for a completed call round trip.
pub fn from_outcome(
    outcome: Result<CallOutcome, ResError>,
    prefix: &str,
    origin: &OriginDecision,
) -> Response {
    match outcome {
        Err(err) => error(&err, origin),
        Ok(CallOutcome::NoContent) => no_content(origin),
        Ok(CallOutcome::Result(raw)) => result(&raw, origin),
        Ok(CallOutcome::ResourceRef(rid)) | Ok(CallOutcome::LegacyRef(rid)) => {
            resource_ref(&rid.to_href(prefix), origin)
        }
    }
}

fn with_origin(mut response: Response, origin: &OriginDecision) -> Response {
    origin.apply(response.headers_mut());
    response
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routing::Rid;

    #[test]
    fn test_error_response() {
        let response = error(&ResError::access_denied(), &OriginDecision::NoOrigin);
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(response.headers()[header::CONTENT_TYPE], "application/json");
    }

    #[test]
    fn test_resource_ref_location() {
        let rid = Rid::parse("test.model").unwrap();
        let response = resource_ref(&rid.to_href("/api/"), &OriginDecision::NoOrigin);
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[header::LOCATION], "/api/test/model");
    }

    #[test]
    fn test_origin_headers_attached_to_errors() {
        let decision = OriginDecision::Forbidden("http://localhost".into());
        let response = error(&ResError::forbidden_origin(), &decision);
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
        assert_eq!(
            response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
            "http://localhost"
        );
        assert_eq!(response.headers()[header::VARY], "Origin");
    }
}
