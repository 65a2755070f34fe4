//! Resource routing subsystem.
//!
//! # Data Flow
//! ```text
//! Request path ("/api/test/model/method")
//!     → path.rs (prefix match, segment split, percent-decode)
//!     → rid.rs (identifier validation)
//!     → Return: (Rid, method) or no match
//! ```
//!
//! # Design Decisions
//! - Parsing is pure and deterministic; no bus traffic on failure
//! - Malformed paths are indistinguishable from unknown resources

pub mod path;
pub mod rid;

pub use path::PathParser;
pub use rid::Rid;
