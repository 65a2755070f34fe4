//! Shared utilities for integration testing.
//!
//! # Testing Strategy
//! The gateway is driven entirely in-process: the axum router is exercised
//! with `tower::ServiceExt::oneshot`, and the message bus is replaced by a
//! scripted [`MockBus`] that records every request and answers from a queue
//! of expectations.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::Body;
use axum::http::Request;
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use tower::ServiceExt;

use busgate::bus::{BusClient, BusError};
use busgate::{GatewayConfig, HttpServer};

/// One scripted bus reply.
#[derive(Debug)]
pub enum Reply {
    /// Respond with the given raw payload.
    Payload(Vec<u8>),
    /// Let the round trip time out.
    Timeout,
}

/// Scripted bus double.
///
/// Expectations are consumed in order; each carries the subject the request
/// must use. Requests arriving with no expectation queued are answered with
/// a timeout and still recorded, so tests can assert that no bus traffic
/// happened at all.
pub struct MockBus {
    expectations: Mutex<VecDeque<(String, Reply)>>,
    requests: Mutex<Vec<(String, serde_json::Value)>>,
}

impl MockBus {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            expectations: Mutex::new(VecDeque::new()),
            requests: Mutex::new(Vec::new()),
        })
    }

    /// Expect a request on `subject` and answer it with `payload`.
    pub fn respond(&self, subject: &str, payload: &str) {
        self.expectations
            .lock()
            .unwrap()
            .push_back((subject.to_string(), Reply::Payload(payload.as_bytes().to_vec())));
    }

    /// Expect a request on `subject` and let it time out.
    #[allow(dead_code)]
    pub fn respond_timeout(&self, subject: &str) {
        self.expectations
            .lock()
            .unwrap()
            .push_back((subject.to_string(), Reply::Timeout));
    }

    /// All requests issued so far, as (subject, decoded payload) pairs.
    pub fn requests(&self) -> Vec<(String, serde_json::Value)> {
        self.requests.lock().unwrap().clone()
    }

    /// Panics unless every expectation was consumed.
    #[allow(dead_code)]
    pub fn verify(&self) {
        let remaining = self.expectations.lock().unwrap().len();
        assert_eq!(remaining, 0, "{} bus expectations not met", remaining);
    }
}

#[async_trait]
impl BusClient for MockBus {
    async fn request(&self, subject: &str, payload: Vec<u8>) -> Result<Vec<u8>, BusError> {
        let decoded =
            serde_json::from_slice(&payload).unwrap_or(serde_json::Value::Null);
        self.requests
            .lock()
            .unwrap()
            .push((subject.to_string(), decoded));

        let expectation = self.expectations.lock().unwrap().pop_front();
        match expectation {
            Some((expected, reply)) => {
                assert_eq!(subject, expected, "unexpected bus subject");
                match reply {
                    Reply::Payload(payload) => Ok(payload),
                    Reply::Timeout => Err(BusError::Timeout),
                }
            }
            None => Err(BusError::Timeout),
        }
    }
}

/// Build a gateway router around the mock bus with default configuration.
pub fn gateway(bus: Arc<MockBus>) -> Router {
    gateway_with(GatewayConfig::default(), bus)
}

/// Build a gateway router with explicit configuration.
pub fn gateway_with(config: GatewayConfig, bus: Arc<MockBus>) -> Router {
    HttpServer::new(config, bus)
        .expect("test configuration rejected")
        .router()
}

/// Issue a POST request against the in-process gateway.
pub async fn post(
    app: &Router,
    uri: &str,
    body: Option<&str>,
    headers: &[(&str, &str)],
) -> Response {
    let mut builder = Request::builder().method("POST").uri(uri);
    for (name, value) in headers {
        builder = builder.header(*name, *value);
    }
    let body = match body {
        Some(body) => Body::from(body.to_string()),
        None => Body::empty(),
    };
    app.clone()
        .oneshot(builder.body(body).unwrap())
        .await
        .unwrap()
}

/// Read the full response body.
pub async fn body_bytes(response: Response) -> Vec<u8> {
    response
        .into_body()
        .collect()
        .await
        .unwrap()
        .to_bytes()
        .to_vec()
}

/// Read the response body as JSON; `None` when empty.
pub async fn body_json(response: Response) -> Option<serde_json::Value> {
    let bytes = body_bytes(response).await;
    if bytes.is_empty() {
        None
    } else {
        Some(serde_json::from_slice(&bytes).expect("response body is not JSON"))
    }
}
