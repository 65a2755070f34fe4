//! Resource identifiers.
//!
//! # Responsibilities
//! - Validate dotted resource ids (`test.model`)
//! - Convert between the dotted form and the slash-separated URL form
//!
//! # Design Decisions
//! - The allowed character class lives in one place ([`is_valid_part_char`])
//!   so the exact set is documented rather than scattered through the parser
//! - Conversion to an href must round-trip through the path parser

use std::fmt;

/// Returns true if `c` may appear in a resource id segment or method name.
///
/// Segments are printable ASCII, excluding the dot and slash separators and
/// the bus-subject/URL metacharacters `*`, `>` and `?`.
pub const fn is_valid_part_char(c: char) -> bool {
    c.is_ascii_graphic() && !matches!(c, '.' | '/' | '*' | '>' | '?')
}

/// Error returned when a string is not a syntactically valid resource id.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid resource id")]
pub struct InvalidRid;

/// A validated dotted resource id, e.g. `test.model`.
///
/// Immutable once parsed. Used as the bus subject suffix for both the access
/// and the call round trip.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Rid(String);

impl Rid {
    /// Parse a dotted resource id.
    ///
    /// The id must be non-empty and consist of non-empty dot-separated
    /// segments restricted to the identifier character class. No leading,
    /// trailing or doubled dots.
    pub fn parse(s: &str) -> Result<Self, InvalidRid> {
        if s.is_empty() {
            return Err(InvalidRid);
        }
        for segment in s.split('.') {
            if segment.is_empty() || !segment.chars().all(is_valid_part_char) {
                return Err(InvalidRid);
            }
        }
        Ok(Self(s.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Build the URL path for this resource under the given normalized
    /// prefix (leading and trailing slash), dots becoming slashes.
    ///
    /// `Rid("test.model").to_href("/api/")` is `/api/test/model`, which the
    /// path parser maps back to the same id.
    pub fn to_href(&self, prefix: &str) -> String {
        let mut href = String::with_capacity(prefix.len() + self.0.len());
        href.push_str(prefix);
        let mut first = true;
        for segment in self.0.split('.') {
            if !first {
                href.push('/');
            }
            href.push_str(segment);
            first = false;
        }
        href
    }
}

impl fmt::Display for Rid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
