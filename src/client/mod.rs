//! Domain API client for the Linear GraphQL service.
//!
//! [`LinearClient`] is the façade command handlers talk to. It is generic over
//! a [`Transport`] so tests can script responses; production code uses
//! [`HttpTransport`]. Each entity's operations are exposed through a narrow
//! capability trait ([`TeamApi`], [`ProjectApi`], [`MilestoneApi`], ...) so a
//! handler depends only on what it calls.
//!
//! Every operation follows the same sequence: validate input locally, resolve
//! human identifiers, send exactly one finished operation, then decode the
//! entity subtree of the response.

pub mod error;
pub mod input;
pub mod queries;
pub mod transport;

mod issues;
mod milestones;
mod projects;
mod resolve;

pub use error::{classify, classify_message, ClientError, Entity, ErrorKind, ValidationError};
pub use input::Field;
pub use issues::IssueApi;
pub use milestones::MilestoneApi;
pub use projects::{ProjectApi, ProjectUpdateApi};
pub use resolve::{TeamApi, UserApi, USER_PAGE};
pub use transport::{GraphQlError, HttpTransport, Transport, TransportError};

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::config::ClientConfig;

/// Typed client over a GraphQL transport.
///
/// Holds nothing but the transport; there is no cache and no state carried
/// between calls.
#[derive(Debug, Clone)]
pub struct LinearClient<T = HttpTransport> {
    transport: T,
}

impl LinearClient<HttpTransport> {
    /// Create an HTTP-backed client from explicit configuration.
    pub fn from_config(config: &ClientConfig) -> Result<Self, ClientError> {
        Ok(Self::new(HttpTransport::new(config)?))
    }
}

impl<T: Transport> LinearClient<T> {
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Run one operation, classifying any failure.
    async fn run(&self, operation: &str, variables: Value) -> Result<Value, ClientError> {
        Ok(self.transport.execute(operation, variables).await?)
    }

    /// Run a query and decode the subtree at `path`. A missing or null
    /// subtree yields `None`.
    async fn query_opt<D: DeserializeOwned>(
        &self,
        operation: &str,
        variables: Value,
        path: &[&str],
    ) -> Result<Option<D>, ClientError> {
        let data = self.run(operation, variables).await?;
        match subtree(data, path) {
            Some(value) => decode(value, path).map(Some),
            None => Ok(None),
        }
    }

    /// Run a query whose subtree must be present.
    async fn query<D: DeserializeOwned>(
        &self,
        operation: &str,
        variables: Value,
        path: &[&str],
    ) -> Result<D, ClientError> {
        self.query_opt(operation, variables, path)
            .await?
            .ok_or_else(|| missing(path))
    }

    /// Look up one entity by ID. A null result is reported as not found.
    async fn get_one<D: DeserializeOwned>(
        &self,
        operation: &str,
        field: &str,
        entity: Entity,
        id: &str,
    ) -> Result<D, ClientError> {
        self.query_opt(operation, serde_json::json!({ "id": id }), &[field])
            .await?
            .ok_or_else(|| ClientError::not_found(entity, format!("no {} with id '{}'", entity, id)))
    }

    /// Run a mutation returning `{success, <entity>}` under `root`.
    async fn mutate<D: DeserializeOwned>(
        &self,
        operation: &str,
        variables: Value,
        root: &str,
        entity: &str,
    ) -> Result<D, ClientError> {
        let data = self.run(operation, variables).await?;
        let payload = subtree(data, &[root]).ok_or_else(|| missing(&[root]))?;
        check_success(&payload, root)?;
        let value = subtree(payload, &[entity]).ok_or_else(|| missing(&[root, entity]))?;
        decode(value, &[root, entity])
    }

    /// Run a mutation returning only `{success}` under `root`.
    async fn mutate_ok(&self, operation: &str, variables: Value, root: &str) -> Result<(), ClientError> {
        let data = self.run(operation, variables).await?;
        let payload = subtree(data, &[root]).ok_or_else(|| missing(&[root]))?;
        check_success(&payload, root)
    }
}

fn subtree(mut value: Value, path: &[&str]) -> Option<Value> {
    for key in path {
        value = match value {
            Value::Object(mut map) => map.remove(*key)?,
            _ => return None,
        };
    }
    (!value.is_null()).then_some(value)
}

fn decode<D: DeserializeOwned>(value: Value, path: &[&str]) -> Result<D, ClientError> {
    serde_json::from_value(value).map_err(|e| {
        ClientError::Transport(TransportError::Decode(format!("{}: {}", path.join("."), e)))
    })
}

fn missing(path: &[&str]) -> ClientError {
    ClientError::Transport(TransportError::Decode(format!(
        "response is missing {}",
        path.join(".")
    )))
}

fn check_success(payload: &Value, root: &str) -> Result<(), ClientError> {
    match payload.get("success").and_then(Value::as_bool) {
        Some(true) => Ok(()),
        _ => Err(ClientError::Remote(format!("{} did not succeed", root))),
    }
}
