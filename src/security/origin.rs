//! CORS origin negotiation.
//!
//! # Responsibilities
//! - Parse the configured allow-origin rule (`*` or a semicolon-separated
//!   list of exact origins)
//! - Decide, per request, which CORS headers to attach and whether the
//!   request is rejected outright
//!
//! # Design Decisions
//! - The decision is computed once, before any bus traffic
//! - A rejected origin still receives the first configured origin in
//!   `Access-Control-Allow-Origin`, so browsers can report the one
//!   canonical allowed origin
//! - Origin comparison is case-insensitive; the request's own spelling is
//!   echoed back on a match

use axum::http::{header, HeaderMap, HeaderValue};

/// Error returned for an unusable allow-origin rule.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InvalidOriginRule {
    #[error("allow-origin rule is empty")]
    Empty,
    #[error("allow-origin entry {0:?} is invalid")]
    Entry(String),
}

/// Configured allow-origin rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OriginPolicy {
    /// Wildcard rule: every origin is allowed, responses are cacheable
    /// across origins.
    Any,
    /// Exact origins, matched case-insensitively. Never empty.
    List(Vec<String>),
}

/// Per-request outcome of matching the `Origin` header against the policy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OriginDecision {
    /// No `Origin` header: same-origin or non-browser caller. No CORS
    /// headers are attached and the request always proceeds.
    NoOrigin,
    /// Wildcard policy matched: `Access-Control-Allow-Origin: *`, no `Vary`.
    Any,
    /// Origin found in the list: echo it and vary by origin.
    Allowed(String),
    /// Origin not in the list: reject the request. Carries the first
    /// configured origin for the rejection's headers.
    Forbidden(String),
}

impl OriginPolicy {
    /// Parse an allow-origin rule from configuration.
    pub fn from_rule(rule: &str) -> Result<Self, InvalidOriginRule> {
        let rule = rule.trim();
        if rule.is_empty() {
            return Err(InvalidOriginRule::Empty);
        }
        if rule == "*" {
            return Ok(Self::Any);
        }
        let mut origins = Vec::new();
        for entry in rule.split(';') {
            let entry = entry.trim();
            if entry.is_empty() || entry.contains('*') {
                return Err(InvalidOriginRule::Entry(entry.to_string()));
            }
            origins.push(entry.to_ascii_lowercase());
        }
        Ok(Self::List(origins))
    }

    /// Match a request's `Origin` header against this policy.
    pub fn decide(&self, origin: Option<&str>) -> OriginDecision {
        let Some(origin) = origin else {
            return OriginDecision::NoOrigin;
        };
        match self {
            Self::Any => OriginDecision::Any,
            Self::List(allowed) => {
                let lower = origin.to_ascii_lowercase();
                if allowed.iter().any(|a| *a == lower) {
                    OriginDecision::Allowed(origin.to_string())
                } else {
                    OriginDecision::Forbidden(allowed[0].clone())
                }
            }
        }
    }
}

impl OriginDecision {
    /// True if the request must be rejected with a forbidden-origin error.
    pub fn is_forbidden(&self) -> bool {
        matches!(self, Self::Forbidden(_))
    }

    /// Attach this decision's CORS headers to a response header map.
    ///
    /// Applied to every response on the request, success or failure.
    pub fn apply(&self, headers: &mut HeaderMap) {
        match self {
            Self::NoOrigin => {}
            Self::Any => {
                headers.insert(
                    header::ACCESS_CONTROL_ALLOW_ORIGIN,
                    HeaderValue::from_static("*"),
                );
            }
            Self::Allowed(origin) | Self::Forbidden(origin) => {
                if let Ok(value) = HeaderValue::from_str(origin) {
                    headers.insert(header::ACCESS_CONTROL_ALLOW_ORIGIN, value);
                }
                headers.insert(header::VARY, HeaderValue::from_static("Origin"));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_rule() {
        assert_eq!(OriginPolicy::from_rule("*"), Ok(OriginPolicy::Any));
        assert_eq!(
            OriginPolicy::from_rule("http://localhost;https://example.com"),
            Ok(OriginPolicy::List(vec![
                "http://localhost".into(),
                "https://example.com".into(),
            ]))
        );
        assert!(OriginPolicy::from_rule("").is_err());
        assert!(OriginPolicy::from_rule("http://localhost;;").is_err());
        assert!(OriginPolicy::from_rule("http://localhost;*").is_err());
    }

    #[test]
    fn test_decide_wildcard() {
        let policy = OriginPolicy::Any;
        assert_eq!(policy.decide(None), OriginDecision::NoOrigin);
        assert_eq!(policy.decide(Some("http://localhost")), OriginDecision::Any);
    }

    #[test]
    fn test_decide_list() {
        let policy =
            OriginPolicy::from_rule("http://localhost;https://example.com").unwrap();
        assert_eq!(policy.decide(None), OriginDecision::NoOrigin);
        assert_eq!(
            policy.decide(Some("https://example.com")),
            OriginDecision::Allowed("https://example.com".into())
        );
        // Case-insensitive match, request spelling echoed.
        assert_eq!(
            policy.decide(Some("HTTP://LOCALHOST")),
            OriginDecision::Allowed("HTTP://LOCALHOST".into())
        );
        // Rejection carries the first configured origin.
        assert_eq!(
            policy.decide(Some("http://evil.example")),
            OriginDecision::Forbidden("http://localhost".into())
        );
    }

    #[test]
    fn test_apply_headers() {
        let mut headers = HeaderMap::new();
        OriginDecision::NoOrigin.apply(&mut headers);
        assert!(headers.is_empty());

        let mut headers = HeaderMap::new();
        OriginDecision::Any.apply(&mut headers);
        assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
        assert!(!headers.contains_key(header::VARY));

        let mut headers = HeaderMap::new();
        OriginDecision::Forbidden("http://localhost".into()).apply(&mut headers);
        assert_eq!(
            headers[header::ACCESS_CONTROL_ALLOW_ORIGIN],
            "http://localhost"
        );
        assert_eq!(headers[header::VARY], "Origin");
    }
}
