//! GraphQL-over-HTTP transport.
//!
//! One [`Transport::execute`] call is exactly one HTTP POST of
//! `{query, variables}` to the configured endpoint. The response envelope
//! `{data, errors}` is decoded here; any populated `errors` array is a
//! failure, even when partial `data` came back with it.

use std::fmt;
use std::time::Instant;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::config::ClientConfig;

/// Failures raised while executing one operation.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("request timed out")]
    Timeout,

    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("failed to decode response: {0}")]
    Decode(String),

    #[error("GraphQL errors: {}", join_messages(.0))]
    GraphQl(Vec<GraphQlError>),
}

/// One entry of the envelope's `errors` array.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GraphQlError {
    pub message: String,
    #[serde(default)]
    pub extensions: Option<Value>,
}

impl fmt::Display for GraphQlError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

fn join_messages(errors: &[GraphQlError]) -> String {
    let messages: Vec<&str> = errors.iter().map(|e| e.message.as_str()).collect();
    format!("[{}]", messages.join("; "))
}

#[derive(Debug, Serialize)]
struct Request<'a> {
    query: &'a str,
    variables: &'a Value,
}

#[derive(Debug, Deserialize)]
struct Envelope {
    #[serde(default)]
    data: Option<Value>,
    #[serde(default)]
    errors: Vec<GraphQlError>,
}

/// Executes protocol operations. Implemented over HTTP by [`HttpTransport`];
/// tests substitute scripted doubles.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Run one query or mutation with fully built variables and return the
    /// decoded `data` object.
    async fn execute(&self, operation: &str, variables: Value) -> Result<Value, TransportError>;
}

/// HTTP transport for the GraphQL endpoint.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    endpoint: String,
    api_key: String,
    client: Client,
}

impl HttpTransport {
    /// Create a transport from explicit configuration.
    pub fn new(config: &ClientConfig) -> Result<Self, TransportError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(concat!("linctl/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            endpoint: config.endpoint.clone(),
            api_key: config.api_key.clone(),
            client,
        })
    }

    fn classify_reqwest(err: reqwest::Error) -> TransportError {
        if err.is_timeout() {
            TransportError::Timeout
        } else {
            TransportError::Http(err)
        }
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn execute(&self, operation: &str, variables: Value) -> Result<Value, TransportError> {
        let name = operation_name(operation);
        let started = Instant::now();

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&Request {
                query: operation,
                variables: &variables,
            })
            .send()
            .await
            .map_err(Self::classify_reqwest)?;

        let status = response.status();
        let body = response.text().await.map_err(Self::classify_reqwest)?;
        tracing::debug!(
            operation = name,
            status = status.as_u16(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "graphql round trip"
        );

        if !status.is_success() {
            return Err(TransportError::Status {
                status: status.as_u16(),
                body,
            });
        }

        decode_envelope(&body)
    }
}

/// Decode a response body into its `data` payload.
///
/// A non-empty `errors` array always fails the call; partial data is dropped.
pub fn decode_envelope(body: &str) -> Result<Value, TransportError> {
    let envelope: Envelope =
        serde_json::from_str(body).map_err(|e| TransportError::Decode(e.to_string()))?;

    if !envelope.errors.is_empty() {
        if envelope.data.as_ref().is_some_and(|d| !d.is_null()) {
            tracing::warn!("discarding partial data returned alongside errors");
        }
        return Err(TransportError::GraphQl(envelope.errors));
    }

    match envelope.data {
        Some(data) if !data.is_null() => Ok(data),
        _ => Err(TransportError::Decode(
            "response contained neither data nor errors".to_string(),
        )),
    }
}

/// Name of an operation document (`query Team(...)` → `Team`), for logging.
pub fn operation_name(operation: &str) -> &str {
    let trimmed = operation.trim_start();
    let rest = trimmed
        .strip_prefix("query")
        .or_else(|| trimmed.strip_prefix("mutation"))
        .unwrap_or(trimmed)
        .trim_start();
    let end = rest
        .find(|c: char| !(c.is_alphanumeric() || c == '_'))
        .unwrap_or(rest.len());
    &rest[..end]
}
