use std::io::Write;

use anyhow::Result;
use clap::Subcommand;

use super::{render, Output};
use crate::client::IssueApi;
use crate::models::*;

#[derive(Debug, Subcommand)]
pub enum IssueCommand {
    /// Show one issue by ID or identifier (ENG-42)
    Get { id: String },
    /// List issues
    List {
        /// Team key or ID
        #[arg(short, long)]
        team: Option<String>,
        /// me, an email, a name, or unassigned
        #[arg(short, long)]
        assignee: Option<String>,
        /// Project ID, or unassigned
        #[arg(short, long, default_value = "")]
        project: String,
        #[arg(short, long, default_value_t = 50)]
        limit: u32,
    },
    /// Create an issue
    Create {
        #[arg(long)]
        title: String,
        /// Team key or ID
        #[arg(short, long)]
        team: String,
        #[arg(short, long)]
        description: Option<String>,
        /// 0 (none) to 4 (low)
        #[arg(long)]
        priority: Option<i64>,
        /// me, an email, or a name
        #[arg(short, long)]
        assignee: Option<String>,
        /// Project ID
        #[arg(short, long, default_value = "")]
        project: String,
    },
    /// Update an issue
    Update {
        id: String,
        #[arg(long)]
        title: Option<String>,
        #[arg(short, long)]
        description: Option<String>,
        #[arg(long)]
        priority: Option<i64>,
        /// me, an email, a name, or none/unassigned to clear
        #[arg(short, long)]
        assignee: Option<String>,
        /// Project ID, or unassigned to remove from its project
        #[arg(short, long, default_value = "")]
        project: String,
    },
    /// Archive an issue
    Archive { id: String },
}

pub async fn run<C, W>(command: IssueCommand, client: &C, out: &mut Output<W>) -> Result<()>
where
    C: IssueApi,
    W: Write,
{
    match command {
        IssueCommand::Get { id } => {
            let issue = client.get_issue(&id).await?;
            out.emit(&issue, || render::issue_detail(&issue))
        }
        IssueCommand::List {
            team,
            assignee,
            project,
            limit,
        } => {
            let filter = IssueFilter {
                team,
                assignee,
                project,
                limit,
            };
            let issues = client.list_issues(&filter).await?;
            out.emit(&issues, || render::issue_list(&issues))
        }
        IssueCommand::Create {
            title,
            team,
            description,
            priority,
            assignee,
            project,
        } => {
            let new = NewIssue {
                title,
                team,
                description,
                priority,
                assignee,
                project,
            };
            let issue = client.create_issue(&new).await?;
            out.emit(&issue, || render::issue_detail(&issue))
        }
        IssueCommand::Update {
            id,
            title,
            description,
            priority,
            assignee,
            project,
        } => {
            let changes = IssueChanges {
                title,
                description,
                priority,
                assignee,
                project,
            };
            let issue = client.update_issue(&id, &changes).await?;
            out.emit(&issue, || render::issue_detail(&issue))
        }
        IssueCommand::Archive { id } => {
            client.archive_issue(&id).await?;
            out.done("archived", "issue", &id)
        }
    }
}
