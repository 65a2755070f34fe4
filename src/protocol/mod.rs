//! Bus protocol envelopes for the call-translation pipeline.
//!
//! # Data Flow
//! ```text
//! HTTP request
//!     → AccessRequest  → "access.<rid>"        → BusReply → grant.rs
//!     → CallRequest    → "call.<rid>.<method>" → BusReply → outcome.rs
//! ```
//!
//! # Design Decisions
//! - Response kinds are disambiguated structurally, by decoding attempts in
//!   a fixed precedence order, not by a version flag
//! - Raw JSON (`RawValue`) flows through untouched wherever the gateway has
//!   no business interpreting it (tokens, params, results)

use serde::{Deserialize, Serialize};
use serde_json::value::RawValue;

pub mod error;
pub mod grant;
pub mod outcome;

pub use error::ResError;
pub use grant::AccessGrant;
pub use outcome::CallOutcome;

/// Payload of an `access.<rid>` request.
///
/// The token is forwarded opaquely and omitted when the caller is
/// unauthenticated; the query is the verbatim raw query string, omitted
/// when empty, so backends can apply query-based scoping.
#[derive(Debug, Serialize)]
pub struct AccessRequest<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub query: Option<&'a str>,
}

/// Payload of a `call.<rid>.<method>` request.
///
/// Params are the raw, unparsed HTTP body; validating their shape is the
/// backend's responsibility.
#[derive(Debug, Serialize)]
pub struct CallRequest<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub params: Option<&'a RawValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub query: Option<&'a str>,
}

/// A decoded bus response envelope.
///
/// At most one of the fields is meaningful; precedence between them is
/// decided by the consumer (`grant` for access replies, `outcome` for call
/// replies).
#[derive(Debug, Default, Deserialize)]
pub struct BusReply {
    pub result: Option<Box<RawValue>>,
    pub resource: Option<Box<RawValue>>,
    pub error: Option<ResError>,
}

impl BusReply {
    /// Decode a raw response payload. An empty payload is a valid, empty
    /// reply.
    pub fn decode(payload: &[u8]) -> Result<Self, serde_json::Error> {
        if payload.iter().all(u8::is_ascii_whitespace) {
            return Ok(Self::default());
        }
        serde_json::from_slice(payload)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_access_request_omits_absent_fields() {
        let req = AccessRequest {
            token: None,
            query: None,
        };
        assert_eq!(serde_json::to_string(&req).unwrap(), "{}");

        let req = AccessRequest {
            token: Some("secret"),
            query: Some("q=foo&f=bar"),
        };
        assert_eq!(
            serde_json::to_string(&req).unwrap(),
            r#"{"token":"secret","query":"q=foo&f=bar"}"#
        );
    }

    #[test]
    fn test_call_request_params_verbatim() {
        let params = serde_json::value::RawValue::from_string(r#"{"value":42}"#.into()).unwrap();
        let req = CallRequest {
            params: Some(&params),
            token: None,
            query: None,
        };
        assert_eq!(
            serde_json::to_string(&req).unwrap(),
            r#"{"params":{"value":42}}"#
        );
    }

    #[test]
    fn test_reply_decode() {
        let reply = BusReply::decode(b"").unwrap();
        assert!(reply.result.is_none() && reply.resource.is_none() && reply.error.is_none());

        let reply = BusReply::decode(br#"{"result":{"foo":"bar"}}"#).unwrap();
        assert_eq!(reply.result.unwrap().get(), r#"{"foo":"bar"}"#);

        let reply = BusReply::decode(br#"{"error":{"code":"x.y","message":"z"}}"#).unwrap();
        assert_eq!(reply.error.unwrap().code, "x.y");

        assert!(BusReply::decode(b"not json").is_err());
    }
}
