//! The call-translation pipeline handler.
//!
//! # Data Flow
//! ```text
//! POST /<prefix>/<rid-as-slashes>/<method>
//!     → origin policy (short-circuits on rejection)
//!     → path parser (Not-Found on any malformed path, no bus traffic)
//!     → access round trip ("access.<rid>", {token, query})
//!     → call round trip ("call.<rid>.<method>", {params, token, query})
//!       issued only after an explicit grant
//!     → response composer
//! ```
//!
//! The two round trips are strictly sequential. The call request is not
//! even constructed until the access reply granted the method; a
//! speculative call could execute before its authorization failure is
//! known.

use axum::{
    body::Body,
    extract::State,
    http::{header, HeaderMap, Request},
    response::Response,
};
use serde_json::value::RawValue;

use crate::bus::BusError;
use crate::http::response as compose;
use crate::http::server::AppState;
use crate::protocol::{outcome, AccessGrant, AccessRequest, BusReply, CallRequest, ResError};

pub async fn call_handler(State(state): State<AppState>, request: Request<Body>) -> Response {
    let origin = header_str(request.headers(), &header::ORIGIN);
    let decision = state.origin.decide(origin);
    if decision.is_forbidden() {
        tracing::debug!(origin = origin.unwrap_or_default(), "Origin rejected");
        return compose::error(&ResError::forbidden_origin(), &decision);
    }

    let Some((rid, method)) = state.parser.parse(request.uri().path()) else {
        return compose::error(&ResError::not_found(), &decision);
    };

    tracing::debug!(rid = %rid, method = %method, "Handling call request");

    let query = request
        .uri()
        .query()
        .filter(|q| !q.is_empty())
        .map(str::to_string);
    let token = bearer_token(request.headers()).map(str::to_string);

    let body = match axum::body::to_bytes(request.into_body(), state.max_body_size).await {
        Ok(body) => body,
        Err(err) => {
            tracing::debug!(rid = %rid, method = %method, error = %err, "Failed to read request body");
            return compose::error(&ResError::invalid_params(), &decision);
        }
    };
    let params = if body.is_empty() {
        None
    } else {
        let text = match String::from_utf8(body.to_vec()) {
            Ok(text) => text,
            Err(_) => return compose::error(&ResError::invalid_params(), &decision),
        };
        match RawValue::from_string(text) {
            Ok(raw) => Some(raw),
            Err(_) => return compose::error(&ResError::invalid_params(), &decision),
        }
    };

    // Access phase. Every failure short-circuits; no call request is issued
    // without an explicit grant.
    let access = AccessRequest {
        token: token.as_deref(),
        query: query.as_deref(),
    };
    let grant = match access_check(&state, rid.as_str(), &access).await {
        Ok(grant) => grant,
        Err(err) => return compose::error(&err, &decision),
    };
    if !grant.allows_call(&method) {
        tracing::debug!(rid = %rid, method = %method, "Call not granted");
        return compose::error(&ResError::access_denied(), &decision);
    }

    // Call phase.
    let call = CallRequest {
        params: params.as_deref(),
        token: token.as_deref(),
        query: query.as_deref(),
    };
    let outcome = dispatch_call(&state, rid.as_str(), &method, &call).await;
    compose::from_outcome(outcome, state.parser.prefix(), &decision)
}

/// Perform the access round trip and decode the grant.
async fn access_check(
    state: &AppState,
    rid: &str,
    request: &AccessRequest<'_>,
) -> Result<AccessGrant, ResError> {
    let subject = format!("access.{}", rid);
    let payload = encode(request)?;
    let reply = match state.bus.request(&subject, payload).await {
        Ok(reply) => reply,
        Err(BusError::Timeout) => return Err(ResError::timeout()),
        Err(err) => {
            tracing::error!(subject = %subject, error = %err, "Access request failed");
            return Err(ResError::internal_error());
        }
    };
    let reply = BusReply::decode(&reply).map_err(|err| {
        tracing::error!(subject = %subject, error = %err, "Malformed access reply");
        ResError::internal_error()
    })?;
    if let Some(err) = reply.error {
        return Err(err);
    }
    AccessGrant::from_result(reply.result.as_deref())
}

/// Perform the call round trip and interpret the reply.
async fn dispatch_call(
    state: &AppState,
    rid: &str,
    method: &str,
    request: &CallRequest<'_>,
) -> Result<outcome::CallOutcome, ResError> {
    let subject = format!("call.{}.{}", rid, method);
    let payload = encode(request)?;
    let reply = match state.bus.request(&subject, payload).await {
        Ok(reply) => reply,
        Err(BusError::Timeout) => return Err(ResError::timeout()),
        Err(err) => {
            tracing::error!(subject = %subject, error = %err, "Call request failed");
            return Err(ResError::internal_error());
        }
    };
    outcome::decode_call_reply(&reply, method)
}

fn encode<T: serde::Serialize>(value: &T) -> Result<Vec<u8>, ResError> {
    serde_json::to_vec(value).map_err(|err| {
        tracing::error!(error = %err, "Failed to encode bus request payload");
        ResError::internal_error()
    })
}

fn header_str<'a>(headers: &'a HeaderMap, name: &header::HeaderName) -> Option<&'a str> {
    headers.get(name).and_then(|v| v.to_str().ok())
}

fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    header_str(headers, &header::AUTHORIZATION)?.strip_prefix("Bearer ")
}
