//! NATS-backed bus client.

use std::time::Duration;

use async_trait::async_trait;

use crate::bus::{BusClient, BusError};

/// [`BusClient`] implementation over a NATS connection.
///
/// The request timeout is configured on the connection and applies to every
/// round trip issued through this client.
pub struct NatsBusClient {
    client: async_nats::Client,
}

impl NatsBusClient {
    /// Connect to the bus at `url` with the given per-request timeout.
    pub async fn connect(url: &str, request_timeout: Duration) -> Result<Self, BusError> {
        let client = async_nats::ConnectOptions::new()
            .request_timeout(Some(request_timeout))
            .connect(url)
            .await
            .map_err(|e| BusError::Transport(e.to_string()))?;

        tracing::info!(url = %url, timeout_ms = request_timeout.as_millis() as u64, "Connected to message bus");
        Ok(Self { client })
    }
}

#[async_trait]
impl BusClient for NatsBusClient {
    async fn request(&self, subject: &str, payload: Vec<u8>) -> Result<Vec<u8>, BusError> {
        match self.client.request(subject.to_string(), payload.into()).await {
            Ok(message) => Ok(message.payload.to_vec()),
            Err(err) => Err(match err.kind() {
                // An unserved subject is indistinguishable from an
                // unresponsive one; both surface as a timeout.
                async_nats::client::RequestErrorKind::TimedOut
                | async_nats::client::RequestErrorKind::NoResponders => BusError::Timeout,
                async_nats::client::RequestErrorKind::Other => BusError::Transport(err.to_string()),
            }),
        }
    }
}
