use async_trait::async_trait;
use serde_json::json;

use super::error::{ClientError, Entity};
use super::input::{self, validate_id};
use super::queries;
use super::transport::Transport;
use super::LinearClient;
use crate::models::*;

/// The five milestone operations.
#[async_trait]
pub trait MilestoneApi: Send + Sync {
    async fn list_milestones(
        &self,
        project_id: &str,
        include_archived: bool,
    ) -> Result<Vec<Milestone>, ClientError>;
    async fn get_milestone(&self, id: &str) -> Result<Milestone, ClientError>;
    async fn create_milestone(&self, new: &NewMilestone) -> Result<Milestone, ClientError>;
    async fn update_milestone(
        &self,
        id: &str,
        changes: &MilestoneChanges,
    ) -> Result<Milestone, ClientError>;
    async fn delete_milestone(&self, id: &str) -> Result<(), ClientError>;
}

#[async_trait]
impl<T: Transport> MilestoneApi for LinearClient<T> {
    async fn list_milestones(
        &self,
        project_id: &str,
        include_archived: bool,
    ) -> Result<Vec<Milestone>, ClientError> {
        let project_id = validate_id(project_id, "project_id")?;
        let milestones: Option<Connection<Milestone>> = self
            .query_opt(
                queries::MILESTONES,
                json!({ "projectId": project_id, "includeArchived": include_archived }),
                &["project", "projectMilestones"],
            )
            .await?;
        milestones.map(|c| c.nodes).ok_or_else(|| {
            ClientError::not_found(Entity::Project, format!("no project with id '{}'", project_id))
        })
    }

    async fn get_milestone(&self, id: &str) -> Result<Milestone, ClientError> {
        let id = validate_id(id, "milestone_id")?;
        self.get_one(queries::MILESTONE, "projectMilestone", Entity::Milestone, id)
            .await
    }

    async fn create_milestone(&self, new: &NewMilestone) -> Result<Milestone, ClientError> {
        let input = input::milestone_create_input(new)?;
        self.mutate(
            queries::CREATE_MILESTONE,
            json!({ "input": input }),
            "projectMilestoneCreate",
            "projectMilestone",
        )
        .await
    }

    async fn update_milestone(
        &self,
        id: &str,
        changes: &MilestoneChanges,
    ) -> Result<Milestone, ClientError> {
        let id = validate_id(id, "milestone_id")?;
        let input = input::milestone_update_input(changes)?;
        self.mutate(
            queries::UPDATE_MILESTONE,
            json!({ "id": id, "input": input }),
            "projectMilestoneUpdate",
            "projectMilestone",
        )
        .await
    }

    async fn delete_milestone(&self, id: &str) -> Result<(), ClientError> {
        let id = validate_id(id, "milestone_id")?;
        self.mutate_ok(
            queries::DELETE_MILESTONE,
            json!({ "id": id }),
            "projectMilestoneDelete",
        )
        .await
    }
}
