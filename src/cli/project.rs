use std::io::Write;

use anyhow::Result;
use clap::Subcommand;

use super::{render, Confirm, Output};
use crate::client::{ProjectApi, ProjectUpdateApi};
use crate::models::*;

#[derive(Debug, Subcommand)]
pub enum ProjectCommand {
    /// List projects
    List {
        /// Team key or ID
        #[arg(short, long)]
        team: Option<String>,
        /// planned, started, paused, completed or canceled
        #[arg(short, long)]
        state: Option<String>,
        /// Include completed and canceled projects
        #[arg(long)]
        include_completed: bool,
        /// all_time, N_<day|week|month|year>_ago, or YYYY-MM-DD
        #[arg(long, default_value = "6_months_ago")]
        newer_than: String,
        /// linear, created or updated
        #[arg(long, default_value = "linear")]
        sort: String,
        #[arg(short, long, default_value_t = 50)]
        limit: u32,
    },
    /// Show one project
    Get { id: String },
    /// Create a project
    Create {
        #[arg(long)]
        name: String,
        /// Team key or ID; repeat for multi-team projects
        #[arg(short, long = "team", required = true)]
        teams: Vec<String>,
        #[arg(short, long)]
        description: Option<String>,
        #[arg(short, long)]
        state: Option<String>,
        /// 0 (none) to 4 (low)
        #[arg(long)]
        priority: Option<i64>,
        /// me, an email, or a name
        #[arg(long)]
        lead: Option<String>,
        /// YYYY-MM-DD
        #[arg(long)]
        start_date: Option<String>,
        /// YYYY-MM-DD
        #[arg(long)]
        target_date: Option<String>,
        #[arg(long)]
        color: Option<String>,
    },
    /// Update a project
    Update {
        id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(short, long)]
        description: Option<String>,
        #[arg(short, long)]
        state: Option<String>,
        #[arg(long)]
        priority: Option<i64>,
        /// me, an email, a name, or none/unassigned to clear
        #[arg(long)]
        lead: Option<String>,
        /// YYYY-MM-DD, or an empty string to clear
        #[arg(long)]
        start_date: Option<String>,
        /// YYYY-MM-DD, or an empty string to clear
        #[arg(long)]
        target_date: Option<String>,
        #[arg(long)]
        color: Option<String>,
    },
    /// Archive a project
    Archive { id: String },
    /// Archive a project, or delete it with --permanent
    Delete {
        id: String,
        /// Permanently delete (cannot be undone)
        #[arg(long)]
        permanent: bool,
        /// Skip confirmation prompt
        #[arg(short, long)]
        force: bool,
    },
    /// Project status updates
    #[command(subcommand)]
    UpdatePost(UpdatePostCommand),
}

#[derive(Debug, Subcommand)]
pub enum UpdatePostCommand {
    /// Post a status update on a project
    Create {
        project_id: String,
        #[arg(short, long)]
        body: String,
        /// onTrack, atRisk or offTrack
        #[arg(long)]
        health: Option<String>,
    },
    /// List a project's status updates
    List { project_id: String },
    /// Show one status update
    Get { id: String },
}

pub async fn run<C, W, P>(
    command: ProjectCommand,
    client: &C,
    out: &mut Output<W>,
    confirm: &mut P,
) -> Result<()>
where
    C: ProjectApi + ProjectUpdateApi,
    W: Write,
    P: Confirm,
{
    match command {
        ProjectCommand::List {
            team,
            state,
            include_completed,
            newer_than,
            sort,
            limit,
        } => {
            let filter = ProjectFilter {
                team,
                state,
                include_completed,
                newer_than: Some(newer_than),
                sort: Some(sort),
                limit,
            };
            let projects = client.list_projects(&filter).await?;
            out.emit(&projects, || render::project_list(&projects))
        }
        ProjectCommand::Get { id } => {
            let project = client.get_project(&id).await?;
            out.emit(&project, || render::project_detail(&project))
        }
        ProjectCommand::Create {
            name,
            teams,
            description,
            state,
            priority,
            lead,
            start_date,
            target_date,
            color,
        } => {
            let new = NewProject {
                name,
                teams,
                description,
                state,
                priority,
                lead,
                start_date,
                target_date,
                color,
            };
            let project = client.create_project(&new).await?;
            out.emit(&project, || render::project_detail(&project))
        }
        ProjectCommand::Update {
            id,
            name,
            description,
            state,
            priority,
            lead,
            start_date,
            target_date,
            color,
        } => {
            let changes = ProjectChanges {
                name,
                description,
                state,
                priority,
                lead,
                start_date,
                target_date,
                color,
            };
            let project = client.update_project(&id, &changes).await?;
            out.emit(&project, || render::project_detail(&project))
        }
        ProjectCommand::Archive { id } => {
            client.archive_project(&id).await?;
            out.done("archived", "project", &id)
        }
        ProjectCommand::Delete {
            id,
            permanent,
            force,
        } => {
            if !force {
                let prompt = if permanent {
                    format!("Permanently delete project {}? This cannot be undone.", id)
                } else {
                    format!("Archive project {}?", id)
                };
                if !confirm.confirm(&prompt)? {
                    anyhow::bail!("Aborted");
                }
            }
            if permanent {
                client.delete_project(&id).await?;
                out.done("deleted", "project", &id)
            } else {
                client.archive_project(&id).await?;
                out.done("archived", "project", &id)
            }
        }
        ProjectCommand::UpdatePost(cmd) => run_update_post(cmd, client, out).await,
    }
}

async fn run_update_post<C, W>(command: UpdatePostCommand, client: &C, out: &mut Output<W>) -> Result<()>
where
    C: ProjectUpdateApi,
    W: Write,
{
    match command {
        UpdatePostCommand::Create {
            project_id,
            body,
            health,
        } => {
            let update = client
                .create_project_update(&project_id, &NewProjectUpdate { body, health })
                .await?;
            out.emit(&update, || render::project_update_detail(&update))
        }
        UpdatePostCommand::List { project_id } => {
            let updates = client.list_project_updates(&project_id).await?;
            out.emit(&updates, || render::project_update_list(&updates))
        }
        UpdatePostCommand::Get { id } => {
            let update = client.get_project_update(&id).await?;
            out.emit(&update, || render::project_update_detail(&update))
        }
    }
}
