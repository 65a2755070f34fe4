//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware)
//!     → handler.rs (origin policy, path parse, two-phase bus exchange)
//!     → response.rs (status/header/body composition)
//!     → Send to client
//! ```

pub mod handler;
pub mod response;
pub mod server;

pub use server::{AppState, HttpServer};
