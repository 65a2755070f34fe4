//! Call reply interpretation.
//!
//! # Responsibilities
//! - Turn the raw bytes of one call reply into a [`CallOutcome`]
//! - Enforce the strict precedence between reply shapes
//!
//! # Design Decisions
//! - A present-but-malformed `resource` wrapper is a hard failure, never a
//!   fall-through to "plain result"; silently accepting it could redirect
//!   clients to bogus locations
//! - The unwrapped legacy `{rid}` shape is accepted only on the
//!   conventional creation method, and each acceptance logs one
//!   deprecation line

use serde::Deserialize;
use serde_json::value::RawValue;

use crate::protocol::{BusReply, ResError};
use crate::routing::Rid;

/// The method name conventionally used for resource creation; the only one
/// on which the legacy reference shape is accepted.
pub const NEW_METHOD: &str = "new";

/// Interpreted result of one call round trip.
///
/// Produced once per reply and consumed exactly once by the response
/// composer.
#[derive(Debug)]
pub enum CallOutcome {
    /// Plain JSON result, returned to the client verbatim.
    Result(Box<RawValue>),
    /// Current-style reference: `{"resource":{"rid":...}}`.
    ResourceRef(Rid),
    /// Deprecated legacy reference: a `result` object with a top-level
    /// `rid`, accepted on [`NEW_METHOD`] only.
    LegacyRef(Rid),
    /// Empty or null reply.
    NoContent,
}

#[derive(Deserialize)]
struct ResourceShape {
    rid: String,
}

#[derive(Deserialize)]
struct LegacyShape {
    rid: Option<String>,
}

/// Decode one call reply, in strict precedence order: error, resource
/// reference (valid or fatal), empty, legacy reference, plain result.
pub fn decode_call_reply(payload: &[u8], method: &str) -> Result<CallOutcome, ResError> {
    let reply = BusReply::decode(payload).map_err(|err| {
        tracing::error!(error = %err, "Malformed call reply from backend");
        ResError::internal_error()
    })?;

    if let Some(err) = reply.error {
        return Err(err);
    }

    if let Some(resource) = reply.resource {
        let shape: ResourceShape = serde_json::from_str(resource.get()).map_err(|err| {
            tracing::error!(resource = %resource, error = %err, "Invalid resource reference in call reply");
            ResError::internal_error()
        })?;
        let rid = Rid::parse(&shape.rid).map_err(|_| {
            tracing::error!(rid = %shape.rid, "Invalid rid in call reply resource reference");
            ResError::internal_error()
        })?;
        return Ok(CallOutcome::ResourceRef(rid));
    }

    let Some(result) = reply.result else {
        return Ok(CallOutcome::NoContent);
    };
    if result.get() == "null" {
        return Ok(CallOutcome::NoContent);
    }

    if method == NEW_METHOD {
        if let Ok(LegacyShape { rid: Some(rid) }) = serde_json::from_str(result.get()) {
            if let Ok(rid) = Rid::parse(&rid) {
                tracing::warn!(
                    rid = %rid,
                    "Deprecated legacy rid reply to a new call; respond with a resource reference instead"
                );
                return Ok(CallOutcome::LegacyRef(rid));
            }
        }
    }

    Ok(CallOutcome::Result(result))
}
