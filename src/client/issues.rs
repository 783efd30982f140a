use async_trait::async_trait;
use serde_json::{json, Value};

use super::error::{ClientError, Entity};
use super::input::{self, validate_issue_id, Field};
use super::queries;
use super::resolve::{TeamApi, UserApi};
use super::transport::Transport;
use super::LinearClient;
use crate::models::*;

/// Issue operations.
#[async_trait]
pub trait IssueApi: Send + Sync {
    /// Look up by UUID or by identifier (`ENG-42`).
    async fn get_issue(&self, id: &str) -> Result<Issue, ClientError>;
    async fn list_issues(&self, filter: &IssueFilter) -> Result<Vec<Issue>, ClientError>;
    async fn create_issue(&self, new: &NewIssue) -> Result<Issue, ClientError>;
    async fn update_issue(&self, id: &str, changes: &IssueChanges) -> Result<Issue, ClientError>;
    async fn archive_issue(&self, id: &str) -> Result<(), ClientError>;
}

#[async_trait]
impl<T: Transport> IssueApi for LinearClient<T> {
    async fn get_issue(&self, id: &str) -> Result<Issue, ClientError> {
        let id = validate_issue_id(id)?;
        self.get_one(queries::ISSUE, "issue", Entity::Issue, id).await
    }

    async fn list_issues(&self, filter: &IssueFilter) -> Result<Vec<Issue>, ClientError> {
        let mut draft = input::issue_list_draft(filter)?;

        if let Some(token) = &draft.team {
            let team = self.resolve_team(token).await?;
            draft
                .filter
                .insert("team".into(), json!({ "id": { "eq": team.id } }));
        }
        if let Field::Set(token) = &draft.assignee {
            let user = self.resolve_user(token).await?;
            draft
                .filter
                .insert("assignee".into(), json!({ "id": { "eq": user.id } }));
        }

        let issues: Connection<Issue> = self
            .query(
                queries::ISSUES,
                json!({ "first": draft.first, "filter": Value::Object(draft.filter) }),
                &["issues"],
            )
            .await?;
        Ok(issues.nodes)
    }

    async fn create_issue(&self, new: &NewIssue) -> Result<Issue, ClientError> {
        let mut draft = input::issue_create_draft(new)?;

        if let Some(token) = &draft.team {
            let team = self.resolve_team(token).await?;
            draft.input.insert("teamId".into(), team.id.into());
        }
        self.resolve_user_field(draft.assignee)
            .await?
            .write_if_set(&mut draft.input, "assigneeId");

        let issue: Issue = self
            .mutate(
                queries::CREATE_ISSUE,
                json!({ "input": draft.input }),
                "issueCreate",
                "issue",
            )
            .await?;
        tracing::debug!(identifier = %issue.identifier, "issue created");
        Ok(issue)
    }

    async fn update_issue(&self, id: &str, changes: &IssueChanges) -> Result<Issue, ClientError> {
        let id = validate_issue_id(id)?;
        let mut draft = input::issue_update_draft(changes)?;

        self.resolve_user_field(draft.assignee)
            .await?
            .write(&mut draft.input, "assigneeId");

        self.mutate(
            queries::UPDATE_ISSUE,
            json!({ "id": id, "input": draft.input }),
            "issueUpdate",
            "issue",
        )
        .await
    }

    async fn archive_issue(&self, id: &str) -> Result<(), ClientError> {
        let id = validate_issue_id(id)?;
        self.mutate_ok(queries::ARCHIVE_ISSUE, json!({ "id": id }), "issueArchive")
            .await
    }
}
