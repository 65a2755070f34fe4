//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create the Axum router with the call endpoint
//! - Wire up middleware (tracing, request timeout)
//! - Bind the server to a listener with graceful shutdown
//!
//! # Design Decisions
//! - All request state is derived from the immutable config at startup and
//!   shared via `AppState`; requests never share mutable state
//! - The bus client is injected behind a trait so tests can script replies

use std::sync::Arc;
use std::time::Duration;

use axum::{routing::post, Router};
use tokio::net::TcpListener;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

use crate::bus::BusClient;
use crate::config::validation::validate_config;
use crate::config::{ConfigError, GatewayConfig};
use crate::http::handler::call_handler;
use crate::routing::PathParser;
use crate::security::OriginPolicy;

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub parser: Arc<PathParser>,
    pub origin: Arc<OriginPolicy>,
    pub bus: Arc<dyn BusClient>,
    pub max_body_size: usize,
}

/// HTTP server for the gateway.
pub struct HttpServer {
    router: Router,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration and bus client.
    ///
    /// The configuration is validated here so a server can never be built
    /// around an unusable origin rule or prefix.
    pub fn new(config: GatewayConfig, bus: Arc<dyn BusClient>) -> Result<Self, ConfigError> {
        validate_config(&config).map_err(ConfigError::Validation)?;

        let origin = OriginPolicy::from_rule(&config.cors.allow_origin)
            .map_err(|err| ConfigError::Validation(vec![
                crate::config::validation::ValidationError::InvalidAllowOrigin(err.to_string()),
            ]))?;

        let state = AppState {
            parser: Arc::new(PathParser::new(&config.api.path_prefix)),
            origin: Arc::new(origin),
            bus,
            max_body_size: config.api.max_body_size,
        };

        let router = Self::build_router(&config, state);
        Ok(Self { router })
    }

    /// Build the Axum router with all middleware layers.
    fn build_router(config: &GatewayConfig, state: AppState) -> Router {
        Router::new()
            .route("/{*path}", post(call_handler))
            .route("/", post(call_handler))
            .with_state(state)
            .layer(TimeoutLayer::new(Duration::from_secs(
                config.timeouts.request_secs,
            )))
            .layer(TraceLayer::new_for_http())
    }

    /// The router, for driving the gateway in-process (tests).
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Run the server, accepting connections on the given listener.
    pub async fn run(self, listener: TcpListener) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

/// Wait for shutdown signal (Ctrl+C).
async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_err() {
        tracing::error!("Failed to install Ctrl+C handler");
        return;
    }
    tracing::info!("Shutdown signal received");
}
