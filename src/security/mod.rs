//! Request security policies.

pub mod origin;

pub use origin::{OriginDecision, OriginPolicy};
