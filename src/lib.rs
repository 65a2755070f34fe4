//! busgate — a synchronous HTTP gateway for resources hosted on an
//! asynchronous message bus.
//!
//! Clients POST to `/<prefix>/<resource>/<method>`; the gateway authorizes
//! the call over the bus, invokes it on the owning service, and maps the
//! reply (plain result, resource reference, legacy reference, empty, or
//! error) to a conventional HTTP response.

pub mod bus;
pub mod config;
pub mod http;
pub mod protocol;
pub mod routing;
pub mod security;

pub use bus::{BusClient, BusError};
pub use config::GatewayConfig;
pub use http::HttpServer;
