//! Message bus abstraction.
//!
//! # Data Flow
//! ```text
//! Pipeline (access / call phase)
//!     → BusClient::request(subject, payload)
//!     → one response payload, or a terminal Timeout
//! ```
//!
//! # Design Decisions
//! - The gateway only ever performs single request/response round trips;
//!   publish/subscribe semantics belong to other subsystems
//! - The per-request timeout is owned by the implementation; callers only
//!   distinguish "answered" from "timed out" and never retry

use async_trait::async_trait;

pub mod nats;

pub use nats::NatsBusClient;

/// Terminal failures of one bus round trip.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BusError {
    /// No response arrived within the configured window. Presented to HTTP
    /// clients as a not-found-equivalent condition.
    #[error("request timed out")]
    Timeout,
    /// The connection to the bus is gone.
    #[error("connection closed")]
    Closed,
    /// Any other transport-level failure.
    #[error("transport error: {0}")]
    Transport(String),
}

/// A client capable of one request/response exchange on the message bus.
///
/// Implementations must be safe to share across concurrently handled HTTP
/// requests; each call is an independent, correlated round trip.
#[async_trait]
pub trait BusClient: Send + Sync {
    /// Send `payload` to `subject` and await exactly one response.
    async fn request(&self, subject: &str, payload: Vec<u8>) -> Result<Vec<u8>, BusError>;
}
