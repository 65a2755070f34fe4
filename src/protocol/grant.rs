//! Access grants.
//!
//! # Design Decisions
//! - Fail closed: a grant missing the `call` field, or with an empty one,
//!   denies every method; authorization must be explicit
//! - Exact token matching only; there is no substring or prefix matching
//!   beyond the one designated wildcard token

use serde::Deserialize;
use serde_json::value::RawValue;

use crate::protocol::ResError;

/// The `call` token granting every method.
pub const CALL_WILDCARD: &str = "*";

/// Decoded result of an access-check round trip.
///
/// Constructed from one access reply, consumed once for an allow/deny
/// decision, never cached across requests.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct AccessGrant {
    /// Read access. Part of the shared access schema; the call pipeline
    /// never consults it.
    #[serde(default)]
    pub get: bool,
    /// Either the wildcard token, a comma-separated set of allowed method
    /// names, or absent meaning no calls are allowed.
    #[serde(default)]
    pub call: Option<String>,
}

impl AccessGrant {
    /// Decode a grant from an access reply's `result` field.
    ///
    /// A missing or null result is a valid reply carrying no grant, which
    /// denies everything. A result that fails to decode is a backend fault.
    pub fn from_result(result: Option<&RawValue>) -> Result<Self, ResError> {
        match result {
            None => Ok(Self::default()),
            Some(raw) if raw.get() == "null" => Ok(Self::default()),
            Some(raw) => serde_json::from_str(raw.get()).map_err(|err| {
                tracing::error!(error = %err, "Malformed access grant from backend");
                ResError::internal_error()
            }),
        }
    }

    /// Whether the grant allows calling `method`.
    pub fn allows_call(&self, method: &str) -> bool {
        match self.call.as_deref() {
            Some(CALL_WILDCARD) => true,
            // Empty entries never match; "" splits into one empty entry.
            Some(list) => list.split(',').any(|m| !m.is_empty() && m == method),
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grant(call: Option<&str>) -> AccessGrant {
        AccessGrant {
            get: true,
            call: call.map(str::to_string),
        }
    }

    #[test]
    fn test_wildcard_allows_any_method() {
        let g = grant(Some("*"));
        assert!(g.allows_call("method"));
        assert!(g.allows_call("new"));
        assert!(g.allows_call("anything-at-all"));
    }

    #[test]
    fn test_listed_methods_match_exactly() {
        let g = grant(Some("foo,method"));
        assert!(g.allows_call("method"));
        assert!(g.allows_call("foo"));
        assert!(!g.allows_call("bar"));
        // No substring matching.
        assert!(!g.allows_call("meth"));
        assert!(!g.allows_call("foo,method"));
    }

    #[test]
    fn test_missing_or_empty_call_denies() {
        assert!(!grant(None).allows_call("method"));
        assert!(!grant(Some("")).allows_call("method"));
        assert!(!grant(Some("")).allows_call(""));
    }

    #[test]
    fn test_from_result() {
        let raw = serde_json::value::RawValue::from_string(r#"{"get":true,"call":"*"}"#.into())
            .unwrap();
        let g = AccessGrant::from_result(Some(&raw)).unwrap();
        assert!(g.get);
        assert!(g.allows_call("method"));

        // Absent or null result denies everything.
        assert!(!AccessGrant::from_result(None).unwrap().allows_call("method"));
        let null = serde_json::value::RawValue::from_string("null".into()).unwrap();
        assert!(!AccessGrant::from_result(Some(&null))
            .unwrap()
            .allows_call("method"));

        // Structurally broken grants are backend faults, not denials.
        let bad = serde_json::value::RawValue::from_string("42".into()).unwrap();
        let err = AccessGrant::from_result(Some(&bad)).unwrap_err();
        assert_eq!(err.code, crate::protocol::error::CODE_INTERNAL_ERROR);
    }
}
