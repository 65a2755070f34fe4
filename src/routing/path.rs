//! HTTP path parsing.
//!
//! # Responsibilities
//! - Match the configured API prefix (exact, case-sensitive)
//! - Split the remainder into resource id segments and a method name
//! - Percent-decode and validate every segment
//!
//! # Design Decisions
//! - Pure function of the path string; no side effects
//! - Every failure mode is reported the same way (`None`), so callers
//!   cannot distinguish a malformed path from an unknown resource

use crate::routing::rid::{is_valid_part_char, Rid};

/// Parses request paths of the form `/<prefix>/<rid-as-slashes>/<method>`.
#[derive(Debug, Clone)]
pub struct PathParser {
    /// Normalized prefix with a single leading and trailing slash.
    prefix: String,
}

impl PathParser {
    /// Create a parser for the given API prefix.
    ///
    /// The prefix is normalized to a single leading and trailing slash, so
    /// `"api"`, `"/api"` and `"/api/"` are equivalent.
    pub fn new(prefix: &str) -> Self {
        let trimmed = prefix.trim_matches('/');
        let prefix = if trimmed.is_empty() {
            "/".to_string()
        } else {
            format!("/{}/", trimmed)
        };
        Self { prefix }
    }

    /// The normalized prefix, suitable for building `Location` hrefs.
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Parse a request path into a resource id and method name.
    ///
    /// Returns `None` for a wrong prefix, fewer than two segments, empty
    /// segments (doubled or trailing slashes), or any segment that decodes
    /// to something outside the identifier character class.
    pub fn parse(&self, path: &str) -> Option<(Rid, String)> {
        let rest = path.strip_prefix(&self.prefix)?;
        if rest.is_empty() {
            return None;
        }

        let mut segments = Vec::new();
        for part in rest.split('/') {
            if part.is_empty() {
                return None;
            }
            let decoded = urlencoding::decode(part).ok()?;
            if decoded.is_empty() || !decoded.chars().all(is_valid_part_char) {
                return None;
            }
            segments.push(decoded.into_owned());
        }
        if segments.len() < 2 {
            return None;
        }

        let method = segments.pop()?;
        let rid = Rid::parse(&segments.join(".")).ok()?;
        Some((rid, method))
    }
}
