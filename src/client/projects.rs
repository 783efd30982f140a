use async_trait::async_trait;
use chrono::Utc;
use serde_json::{json, Value};

use super::error::{ClientError, Entity};
use super::input::{self, validate_id};
use super::queries;
use super::resolve::TeamApi;
use super::transport::Transport;
use super::LinearClient;
use crate::models::*;

/// Page size for project update posts.
const UPDATE_PAGE: u32 = 50;

/// Project operations.
#[async_trait]
pub trait ProjectApi: Send + Sync {
    async fn list_projects(&self, filter: &ProjectFilter) -> Result<Vec<Project>, ClientError>;
    async fn get_project(&self, id: &str) -> Result<Project, ClientError>;
    async fn create_project(&self, new: &NewProject) -> Result<Project, ClientError>;
    async fn update_project(&self, id: &str, changes: &ProjectChanges) -> Result<Project, ClientError>;
    /// Soft delete. Archiving an archived project succeeds.
    async fn archive_project(&self, id: &str) -> Result<(), ClientError>;
    /// Permanent delete.
    async fn delete_project(&self, id: &str) -> Result<(), ClientError>;
}

/// Status posts on a project.
#[async_trait]
pub trait ProjectUpdateApi: Send + Sync {
    async fn list_project_updates(&self, project_id: &str) -> Result<Vec<ProjectUpdate>, ClientError>;
    async fn get_project_update(&self, id: &str) -> Result<ProjectUpdate, ClientError>;
    async fn create_project_update(
        &self,
        project_id: &str,
        new: &NewProjectUpdate,
    ) -> Result<ProjectUpdate, ClientError>;
}

#[async_trait]
impl<T: Transport> ProjectApi for LinearClient<T> {
    async fn list_projects(&self, filter: &ProjectFilter) -> Result<Vec<Project>, ClientError> {
        let mut draft = input::project_list_draft(filter, Utc::now())?;

        if let Some(token) = &draft.team {
            let team = self.resolve_team(token).await?;
            draft.filter.insert(
                "accessibleTeams".into(),
                json!({ "some": { "id": { "eq": team.id } } }),
            );
        }

        let mut variables = json!({
            "first": draft.first,
            "filter": Value::Object(draft.filter),
        });
        if let Some(order_by) = draft.order_by {
            variables["orderBy"] = order_by.into();
        }

        let projects: Connection<Project> = self
            .query(queries::PROJECTS, variables, &["projects"])
            .await?;
        Ok(projects.nodes)
    }

    async fn get_project(&self, id: &str) -> Result<Project, ClientError> {
        let id = validate_id(id, "project_id")?;
        self.get_one(queries::PROJECT, "project", Entity::Project, id).await
    }

    async fn create_project(&self, new: &NewProject) -> Result<Project, ClientError> {
        let mut draft = input::project_create_draft(new)?;

        let mut team_ids = Vec::with_capacity(draft.teams.len());
        for token in &draft.teams {
            team_ids.push(self.resolve_team(token).await?.id);
        }
        draft.input.insert("teamIds".into(), json!(team_ids));
        self.resolve_user_field(draft.lead)
            .await?
            .write_if_set(&mut draft.input, "leadId");

        let project: Project = self
            .mutate(
                queries::CREATE_PROJECT,
                json!({ "input": draft.input }),
                "projectCreate",
                "project",
            )
            .await?;
        tracing::debug!(id = %project.id, name = %project.name, "project created");
        Ok(project)
    }

    async fn update_project(&self, id: &str, changes: &ProjectChanges) -> Result<Project, ClientError> {
        let id = validate_id(id, "project_id")?;
        let mut draft = input::project_update_draft(changes)?;

        self.resolve_user_field(draft.lead)
            .await?
            .write(&mut draft.input, "leadId");

        self.mutate(
            queries::UPDATE_PROJECT,
            json!({ "id": id, "input": draft.input }),
            "projectUpdate",
            "project",
        )
        .await
    }

    async fn archive_project(&self, id: &str) -> Result<(), ClientError> {
        let id = validate_id(id, "project_id")?;
        self.mutate_ok(queries::ARCHIVE_PROJECT, json!({ "id": id }), "projectArchive")
            .await
    }

    async fn delete_project(&self, id: &str) -> Result<(), ClientError> {
        let id = validate_id(id, "project_id")?;
        self.mutate_ok(queries::DELETE_PROJECT, json!({ "id": id }), "projectDelete")
            .await
    }
}

#[async_trait]
impl<T: Transport> ProjectUpdateApi for LinearClient<T> {
    async fn list_project_updates(&self, project_id: &str) -> Result<Vec<ProjectUpdate>, ClientError> {
        let project_id = validate_id(project_id, "project_id")?;
        let updates: Option<Connection<ProjectUpdate>> = self
            .query_opt(
                queries::PROJECT_UPDATES,
                json!({ "projectId": project_id, "first": UPDATE_PAGE }),
                &["project", "projectUpdates"],
            )
            .await?;
        updates.map(|c| c.nodes).ok_or_else(|| {
            ClientError::not_found(Entity::Project, format!("no project with id '{}'", project_id))
        })
    }

    async fn get_project_update(&self, id: &str) -> Result<ProjectUpdate, ClientError> {
        let id = validate_id(id, "update_id")?;
        self.get_one(queries::PROJECT_UPDATE, "projectUpdate", Entity::ProjectUpdate, id)
            .await
    }

    async fn create_project_update(
        &self,
        project_id: &str,
        new: &NewProjectUpdate,
    ) -> Result<ProjectUpdate, ClientError> {
        let input = input::project_update_post_input(project_id, new)?;
        self.mutate(
            queries::CREATE_PROJECT_UPDATE,
            json!({ "input": input }),
            "projectUpdateCreate",
            "projectUpdate",
        )
        .await
    }
}
