use std::io::Write;

use anyhow::Result;
use clap::Subcommand;

use super::{render, Confirm, Output};
use crate::client::MilestoneApi;
use crate::models::*;

#[derive(Debug, Subcommand)]
pub enum MilestoneCommand {
    /// List a project's milestones
    List {
        project_id: String,
        #[arg(long)]
        include_archived: bool,
    },
    /// Show one milestone
    Get { id: String },
    /// Create a milestone
    Create {
        /// Project ID
        #[arg(short, long)]
        project: String,
        #[arg(long)]
        name: String,
        #[arg(short, long)]
        description: Option<String>,
        /// YYYY-MM-DD
        #[arg(long)]
        target_date: Option<String>,
    },
    /// Update a milestone
    Update {
        id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(short, long)]
        description: Option<String>,
        /// YYYY-MM-DD, or an empty string to clear
        #[arg(long)]
        target_date: Option<String>,
    },
    /// Delete a milestone
    Delete {
        id: String,
        /// Skip confirmation prompt
        #[arg(short, long)]
        force: bool,
    },
}

pub async fn run<C, W, P>(
    command: MilestoneCommand,
    client: &C,
    out: &mut Output<W>,
    confirm: &mut P,
) -> Result<()>
where
    C: MilestoneApi,
    W: Write,
    P: Confirm,
{
    match command {
        MilestoneCommand::List {
            project_id,
            include_archived,
        } => {
            let milestones = client.list_milestones(&project_id, include_archived).await?;
            out.emit(&milestones, || render::milestone_list(&milestones))
        }
        MilestoneCommand::Get { id } => {
            let milestone = client.get_milestone(&id).await?;
            out.emit(&milestone, || render::milestone_detail(&milestone))
        }
        MilestoneCommand::Create {
            project,
            name,
            description,
            target_date,
        } => {
            let new = NewMilestone {
                project,
                name,
                description,
                target_date,
            };
            let milestone = client.create_milestone(&new).await?;
            out.emit(&milestone, || render::milestone_detail(&milestone))
        }
        MilestoneCommand::Update {
            id,
            name,
            description,
            target_date,
        } => {
            let changes = MilestoneChanges {
                name,
                description,
                target_date,
            };
            let milestone = client.update_milestone(&id, &changes).await?;
            out.emit(&milestone, || render::milestone_detail(&milestone))
        }
        MilestoneCommand::Delete { id, force } => {
            if !force && !confirm.confirm(&format!("Delete milestone {}?", id))? {
                anyhow::bail!("Aborted");
            }
            client.delete_milestone(&id).await?;
            out.done("deleted", "milestone", &id)
        }
    }
}
