//! Team and user lookup, including resolution of human identifiers.

use async_trait::async_trait;
use serde_json::json;

use super::error::{ClientError, Entity, ErrorKind, ValidationError};
use super::input::Field;
use super::queries;
use super::transport::Transport;
use super::LinearClient;
use crate::models::*;

/// Page size used when scanning users for a name or email match.
pub const USER_PAGE: u32 = 100;

/// Team lookups.
#[async_trait]
pub trait TeamApi: Send + Sync {
    async fn list_teams(&self) -> Result<Vec<Team>, ClientError>;

    /// Resolve a team key (`ENG`) or a team ID.
    ///
    /// The key lookup runs first; if it does not yield exactly one team the
    /// token is tried as an ID. When both fail the error is a team not-found
    /// naming the token.
    async fn resolve_team(&self, token: &str) -> Result<Team, ClientError>;
}

/// User lookups.
#[async_trait]
pub trait UserApi: Send + Sync {
    /// The authenticated user.
    async fn viewer(&self) -> Result<User, ClientError>;

    async fn list_users(&self, limit: u32) -> Result<Vec<User>, ClientError>;

    /// Resolve `me`, an email, or a name to a user.
    async fn resolve_user(&self, token: &str) -> Result<User, ClientError>;
}

#[async_trait]
impl<T: Transport> TeamApi for LinearClient<T> {
    async fn list_teams(&self) -> Result<Vec<Team>, ClientError> {
        let teams: Connection<Team> = self
            .query(queries::TEAMS, json!({ "first": 250 }), &["teams"])
            .await?;
        Ok(teams.nodes)
    }

    async fn resolve_team(&self, token: &str) -> Result<Team, ClientError> {
        let token = token.trim();
        if token.is_empty() {
            return Err(ValidationError::Missing { field: "team" }.into());
        }

        let by_key: Connection<Team> = self
            .query(queries::TEAM_BY_KEY, json!({ "key": token }), &["teams"])
            .await?;
        if let [team] = by_key.nodes.as_slice() {
            return Ok(team.clone());
        }

        tracing::debug!(token, matches = by_key.len(), "no unique team key match, trying id");
        let by_id = self
            .query_opt::<Team>(queries::TEAM, json!({ "id": token }), &["team"])
            .await;
        match by_id {
            Ok(Some(team)) => Ok(team),
            Ok(None) => Err(team_not_found(token)),
            // Remote rejections of the ID lookup mean the token is not an ID
            // either. Network and auth failures are reported as such.
            Err(err) if matches!(
                err.kind(),
                Some(ErrorKind::NotFound(_) | ErrorKind::Validation | ErrorKind::Unclassified)
            ) =>
            {
                Err(team_not_found(token))
            }
            Err(err) => Err(err),
        }
    }
}

fn team_not_found(token: &str) -> ClientError {
    ClientError::not_found(Entity::Team, format!("no team with key or id '{}'", token))
}

#[async_trait]
impl<T: Transport> UserApi for LinearClient<T> {
    async fn viewer(&self) -> Result<User, ClientError> {
        self.query(queries::VIEWER, json!({}), &["viewer"]).await
    }

    async fn list_users(&self, limit: u32) -> Result<Vec<User>, ClientError> {
        let users: Connection<User> = self
            .query(queries::USERS, json!({ "first": limit }), &["users"])
            .await?;
        Ok(users.nodes)
    }

    async fn resolve_user(&self, token: &str) -> Result<User, ClientError> {
        let token = token.trim();
        if token.is_empty() {
            return Err(ValidationError::Missing { field: "user" }.into());
        }
        if token.eq_ignore_ascii_case("me") {
            return self.viewer().await;
        }

        self.list_users(USER_PAGE)
            .await?
            .into_iter()
            .find(|user| user.matches(token))
            .ok_or_else(|| {
                ClientError::not_found(Entity::User, format!("no user matching '{}'", token))
            })
    }
}

impl<T: Transport> LinearClient<T> {
    /// Replace a set user token with the resolved user's ID.
    pub(crate) async fn resolve_user_field(
        &self,
        field: Field<String>,
    ) -> Result<Field<String>, ClientError> {
        match field {
            Field::Set(token) => Ok(Field::Set(self.resolve_user(&token).await?.id)),
            Field::Cleared => Ok(Field::Cleared),
            Field::Unspecified => Ok(Field::Unspecified),
        }
    }
}
