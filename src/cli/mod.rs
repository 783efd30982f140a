//! Command layer: argument definitions and handlers.
//!
//! Handlers are generic over the client capability traits and write to an
//! [`Output`], so they run the same against [`crate::client::LinearClient`]
//! and against test doubles.

mod issue;
mod milestone;
mod project;
pub mod render;
mod workspace;

use std::io::Write;

use anyhow::Result;
use clap::{Parser, Subcommand};
use serde::Serialize;

use crate::client::{IssueApi, MilestoneApi, ProjectApi, ProjectUpdateApi, TeamApi, UserApi};

pub use issue::IssueCommand;
pub use milestone::MilestoneCommand;
pub use project::{ProjectCommand, UpdatePostCommand};
pub use workspace::{TeamCommand, UserCommand};

#[derive(Debug, Parser)]
#[command(name = "linctl")]
#[command(about = "Manage Linear issues, projects, milestones and teams from the terminal")]
#[command(version)]
pub struct Cli {
    /// Print results as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Log every request to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Projects and their status updates
    #[command(subcommand)]
    Project(ProjectCommand),
    /// Project milestones
    #[command(subcommand)]
    Milestone(MilestoneCommand),
    /// Issues
    #[command(subcommand)]
    Issue(IssueCommand),
    /// Teams
    #[command(subcommand)]
    Team(TeamCommand),
    /// Users
    #[command(subcommand)]
    User(UserCommand),
}

/// Asks the operator to confirm a destructive action.
pub trait Confirm {
    fn confirm(&mut self, prompt: &str) -> Result<bool>;
}

impl<F: FnMut(&str) -> Result<bool>> Confirm for F {
    fn confirm(&mut self, prompt: &str) -> Result<bool> {
        self(prompt)
    }
}

/// Destination for command results: pretty JSON or plaintext.
pub struct Output<W: Write> {
    json: bool,
    writer: W,
}

impl<W: Write> Output<W> {
    pub fn new(writer: W, json: bool) -> Self {
        Self { json, writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }

    /// Write `value` as JSON, or the text produced by `plain`.
    pub fn emit<T: Serialize + ?Sized>(&mut self, value: &T, plain: impl FnOnce() -> String) -> Result<()> {
        if self.json {
            serde_json::to_writer_pretty(&mut self.writer, value)?;
            writeln!(self.writer)?;
        } else {
            write!(self.writer, "{}", plain())?;
        }
        Ok(())
    }

    /// Report a completed action on an entity.
    pub fn done(&mut self, action: &str, entity: &str, id: &str) -> Result<()> {
        let value = serde_json::json!({ "id": id, "action": action, "success": true });
        self.emit(&value, || format!("{} {} {}\n", capitalize(action), entity, id))
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Run one command against `client`.
pub async fn run<C, W, P>(command: Command, client: &C, out: &mut Output<W>, confirm: &mut P) -> Result<()>
where
    C: TeamApi + UserApi + ProjectApi + ProjectUpdateApi + MilestoneApi + IssueApi,
    W: Write,
    P: Confirm,
{
    match command {
        Command::Project(cmd) => project::run(cmd, client, out, confirm).await,
        Command::Milestone(cmd) => milestone::run(cmd, client, out, confirm).await,
        Command::Issue(cmd) => issue::run(cmd, client, out).await,
        Command::Team(cmd) => workspace::run_team(cmd, client, out).await,
        Command::User(cmd) => workspace::run_user(cmd, client, out).await,
    }
}
